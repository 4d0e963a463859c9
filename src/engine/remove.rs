//! Backup-aware removal and restoration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use super::{ToggleReport, backup_path, entry_exists, prune_empty_dirs};
use crate::error::Result;
use crate::overlay::{FilePair, OverlayKind};

/// Reverses a deployment, restoring displaced originals where a backup
/// protects them
pub struct Remover;

impl Remover {
    /// Remove one category of pairs
    ///
    /// Engine-owned categories are simply deleted; the overrides category
    /// restores the backed-up original and refuses to touch any file whose
    /// backup is missing (it may be a legitimate, untouched original). A
    /// missing backup is a per-file warning, never fatal for the batch.
    pub fn remove(
        kind: OverlayKind,
        pairs: &[FilePair],
        dest_root: &Path,
        runtime_log: &Path,
        report: &mut ToggleReport,
    ) {
        let mut touched_dirs = Vec::new();

        for pair in pairs {
            let result = if kind.backs_up() {
                Self::restore_original(pair, runtime_log, report)
            } else {
                Self::remove_owned(pair, &mut touched_dirs, report)
            };
            if let Err(e) = result {
                warn!(dest = %pair.dest.display(), "remove failed: {e:#}");
                report
                    .errors
                    .push(format!("{}: {e:#}", pair.dest.display()));
            }
        }

        prune_empty_dirs(touched_dirs, dest_root, report);
    }

    /// Engine-owned entry: nothing to restore, just delete
    fn remove_owned(
        pair: &FilePair,
        touched_dirs: &mut Vec<PathBuf>,
        report: &mut ToggleReport,
    ) -> Result<()> {
        if entry_exists(&pair.dest) {
            fs::remove_file(&pair.dest)
                .with_context(|| format!("Failed to remove {}", pair.dest.display()))?;
            report.removed += 1;
            debug!(dest = %pair.dest.display(), "removed");
        }
        if let Some(parent) = pair.dest.parent() {
            touched_dirs.push(parent.to_path_buf());
        }
        Ok(())
    }

    /// Override entry: only removable when the displaced original's backup
    /// is still there to take its place
    fn restore_original(
        pair: &FilePair,
        runtime_log: &Path,
        report: &mut ToggleReport,
    ) -> Result<()> {
        let backup = backup_path(&pair.dest);
        if !entry_exists(&backup) {
            warn!(dest = %pair.dest.display(), "no backup file found, leaving in place");
            report
                .warnings
                .push(format!("no backup file found for {}", pair.dest.display()));
            return Ok(());
        }

        if entry_exists(&pair.dest) {
            fs::remove_file(&pair.dest)
                .with_context(|| format!("Failed to remove {}", pair.dest.display()))?;
            report.removed += 1;
        }

        // The mod-loading runtime leaves its log behind; stale once the
        // overrides are gone.
        if entry_exists(runtime_log) {
            let _ = fs::remove_file(runtime_log);
        }

        fs::rename(&backup, &pair.dest)
            .with_context(|| format!("Failed to restore backup to {}", pair.dest.display()))?;
        report.restored += 1;
        debug!(dest = %pair.dest.display(), "restored original");
        Ok(())
    }
}
