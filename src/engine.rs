//! Overlay reconciliation engine
//!
//! Applies the three overlay categories onto the installation in a fixed
//! order (overrides, additions, mods), with backup-and-restore semantics
//! for displaced originals, and keeps the engine-owned mods subtree
//! convergent with its source tree. One invocation runs one cycle; nothing
//! is persisted between runs.

mod deploy;
mod reconcile;
mod remove;
mod reporting;
mod toggle;

#[cfg(test)]
mod integration_tests;

pub use deploy::Deployer;
pub use reconcile::Reconciler;
pub use remove::Remover;
pub use reporting::ToggleReporter;
pub use toggle::{ToggleAction, ToggleEngine, ToggleOutcome};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::game;

/// Counters and per-file diagnostics accumulated over one toggle cycle
#[derive(Debug, Clone, Default)]
pub struct ToggleReport {
    /// Files placed at their destination
    pub placed: usize,
    /// Destination files displaced into a backup
    pub backed_up: usize,
    /// Backups restored to their original name
    pub restored: usize,
    /// Engine-placed files deleted
    pub removed: usize,
    /// Orphaned destination files cleaned up
    pub orphans_removed: usize,
    /// Emptied directories pruned
    pub dirs_pruned: usize,
    /// Per-file warnings (missing backups, unreadable entries)
    pub warnings: Vec<String>,
    /// Per-file I/O errors; the batch continues past them
    pub errors: Vec<String>,
}

impl ToggleReport {
    /// Total file operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.placed + self.restored + self.removed + self.orphans_removed
    }

    /// Whether the cycle completed without per-file errors
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Backup name for a destination path: the file name plus the backup suffix
#[must_use]
pub fn backup_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(game::BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Whether anything occupies a path, including a dangling symlink
pub(crate) fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove now-empty directories, deepest first, walking each chain upward
/// until a non-empty directory or `stop` is reached. `stop` itself and
/// anything outside it are never touched.
pub(crate) fn prune_empty_dirs(mut dirs: Vec<PathBuf>, stop: &Path, report: &mut ToggleReport) {
    dirs.sort();
    dirs.dedup();
    dirs.reverse();

    for dir in dirs {
        let mut current = dir;
        loop {
            if current == stop || !current.starts_with(stop) {
                break;
            }
            match fs::read_dir(&current) {
                Ok(mut entries) => {
                    if entries.next().is_some() {
                        break;
                    }
                }
                Err(_) => break,
            }
            if fs::remove_dir(&current).is_err() {
                break;
            }
            report.dirs_pruned += 1;
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }
    }
}
