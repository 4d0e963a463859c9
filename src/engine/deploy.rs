//! Backup-aware placement of overlay files

use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use tracing::{debug, warn};

use super::{ToggleReport, backup_path, entry_exists};
use crate::error::Result;
use crate::overlay::{FilePair, OverlayKind};

/// Places overlay files at their destinations, displacing pre-existing
/// originals into single-generation backups
pub struct Deployer;

impl Deployer {
    /// Deploy one category of pairs
    ///
    /// Individual failures are recorded in the report with source and
    /// destination context; the batch keeps going. Re-running on an
    /// already-deployed pair set is a no-op.
    pub fn deploy(kind: OverlayKind, pairs: &[FilePair], report: &mut ToggleReport) {
        for pair in pairs {
            if let Err(e) = Self::deploy_one(kind, pair, report) {
                warn!(
                    source = %pair.source.display(),
                    dest = %pair.dest.display(),
                    "deploy failed: {e:#}"
                );
                report
                    .errors
                    .push(format!("{} -> {}: {e:#}", pair.source.display(), pair.dest.display()));
            }
        }
    }

    fn deploy_one(kind: OverlayKind, pair: &FilePair, report: &mut ToggleReport) -> Result<()> {
        if let Some(parent) = pair.dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if kind.backs_up() && entry_exists(&pair.dest) {
            let backup = backup_path(&pair.dest);
            // Only the first displacement creates a backup; a later forced
            // deploy must not overwrite the preserved original.
            if !entry_exists(&backup) {
                fs::rename(&pair.dest, &backup)
                    .with_context(|| format!("Failed to back up {}", pair.dest.display()))?;
                report.backed_up += 1;
                debug!(dest = %pair.dest.display(), "displaced original into backup");
            }
        }

        if !entry_exists(&pair.dest) {
            place(&pair.source, &pair.dest)?;
            report.placed += 1;
            debug!(
                source = %pair.source.display(),
                dest = %pair.dest.display(),
                "placed"
            );
        }

        Ok(())
    }
}

/// Place source content at the destination: a symlink where the platform
/// provides one, so source edits show up without redeploying, otherwise an
/// equal-content copy.
fn place(source: &Path, dest: &Path) -> Result<()> {
    match create_symlink(source, dest) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!(dest = %dest.display(), "symlink unavailable ({err}), copying instead");
            fs::copy(source, dest).map(|_| ()).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    dest.display()
                )
            })
        }
    }
}

#[cfg(unix)]
fn create_symlink(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn create_symlink(source: &Path, dest: &Path) -> io::Result<()> {
    // Needs either admin rights or developer mode; the copy fallback
    // covers the rest.
    std::os::windows::fs::symlink_file(source, dest)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_source: &Path, _dest: &Path) -> io::Result<()> {
    Err(io::Error::other("symlinks unavailable on this platform"))
}
