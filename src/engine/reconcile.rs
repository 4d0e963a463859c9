//! Orphan cleanup for the engine-owned mods subtree

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;
use walkdir::WalkDir;

use super::{ToggleReport, entry_exists, prune_empty_dirs};
use crate::error::Result;

/// Deletes destination files whose source counterpart no longer exists
pub struct Reconciler;

impl Reconciler {
    /// Walk the destination mods subtree and delete every file with no
    /// counterpart at the same relative path in the source tree, then prune
    /// directories the deletions emptied. Everything under this subtree is
    /// engine-placed, so there is no original to protect.
    ///
    /// Runs whether the cycle installed or uninstalled: files removed from
    /// the source tree between runs must never linger at the destination.
    ///
    /// # Errors
    ///
    /// Returns an error only if a destination path cannot be relativized;
    /// unreadable entries and failed deletions are recorded in the report
    /// and the walk continues.
    pub fn reconcile(
        dest_mods: &Path,
        source_mods: &Path,
        report: &mut ToggleReport,
    ) -> Result<()> {
        if !dest_mods.is_dir() {
            return Ok(());
        }

        let mut touched_dirs = Vec::new();
        for entry in WalkDir::new(dest_mods).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    report
                        .warnings
                        .push(format!("unreadable entry during cleanup: {e}"));
                    continue;
                }
            };
            let file_type = entry.file_type();
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }

            let rel = entry.path().strip_prefix(dest_mods).with_context(|| {
                format!("Failed to relativize {}", entry.path().display())
            })?;
            if entry_exists(&source_mods.join(rel)) {
                continue;
            }

            match fs::remove_file(entry.path()) {
                Ok(()) => {
                    report.orphans_removed += 1;
                    debug!(dest = %entry.path().display(), "removed orphan");
                    if let Some(parent) = entry.path().parent() {
                        touched_dirs.push(parent.to_path_buf());
                    }
                }
                Err(e) => {
                    report.errors.push(format!(
                        "{}: Failed to remove orphan: {e}",
                        entry.path().display()
                    ));
                }
            }
        }

        prune_empty_dirs(touched_dirs, dest_mods, report);
        Ok(())
    }
}
