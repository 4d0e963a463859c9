//! Toggle decision and cycle orchestration
//!
//! State is derived from the filesystem every run: the installed count
//! under the destination mods subtree, and the available count in the
//! source mods tree. Nothing is persisted, so a manually altered
//! destination shows up as a count mismatch and is repaired by a forced
//! install.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use walkdir::WalkDir;

use super::{Deployer, Reconciler, Remover, ToggleReport};
use crate::error::Result;
use crate::game::GamePaths;
use crate::overlay::{OverlayKind, OverlayTree, is_skip_marked};

/// Action chosen for the current cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Deploy all overlay categories
    Install,
    /// Remove all overlay categories
    Uninstall,
}

impl ToggleAction {
    /// Human-readable label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Uninstall => "uninstall",
        }
    }
}

/// Outcome of one full toggle cycle
#[derive(Debug)]
pub struct ToggleOutcome {
    /// Action the decision engine chose
    pub action: ToggleAction,
    /// Mod files installed before the cycle ran
    pub installed_before: usize,
    /// Mod files available in the source tree, skip-marked excluded
    pub available: usize,
    /// Mod files installed after the cycle ran
    pub installed_after: usize,
    /// Whether the install decision was forced
    pub forced: bool,
    /// Counters and per-file diagnostics
    pub report: ToggleReport,
}

/// Coordinates one toggle cycle over the three overlay categories
pub struct ToggleEngine {
    paths: GamePaths,
    source_root: PathBuf,
    force: bool,
}

impl ToggleEngine {
    /// Create an engine for one resolved installation and source root
    #[must_use]
    pub const fn new(paths: GamePaths, source_root: PathBuf, force: bool) -> Self {
        Self {
            paths,
            source_root,
            force,
        }
    }

    /// Decide the action from observed state and run the full cycle
    ///
    /// # Errors
    ///
    /// Returns an error if the destination mods directory cannot be
    /// created or a source tree cannot be traversed. Per-file I/O failures
    /// are collected in the outcome's report instead.
    pub fn run(&self) -> Result<ToggleOutcome> {
        let mut report = ToggleReport::default();
        let mut force = self.force;

        // A missing destination directory means nothing was ever installed.
        if !self.paths.mods_dir.is_dir() {
            fs::create_dir_all(&self.paths.mods_dir).with_context(|| {
                format!(
                    "Failed to create mods directory: {}",
                    self.paths.mods_dir.display()
                )
            })?;
            force = true;
        }

        let installed_before = count_files(&self.paths.mods_dir);
        let available = count_available(&self.source_root.join(OverlayKind::Mods.source_dir_name()));

        // Mods added or removed since the last cycle make the counts
        // diverge; a forced install repairs the asymmetry.
        if available != installed_before {
            force = true;
        }

        let action = if installed_before > 0 && !force {
            ToggleAction::Uninstall
        } else {
            ToggleAction::Install
        };
        debug!(
            installed = installed_before,
            available,
            force,
            action = action.label(),
            "decided toggle action"
        );

        match action {
            ToggleAction::Install => self.install(&mut report)?,
            ToggleAction::Uninstall => self.uninstall(&mut report)?,
        }

        // Reconciliation runs unconditionally so source-tree deletions
        // propagate even when the cycle chose not to redeploy.
        Reconciler::reconcile(
            &self.paths.mods_dir,
            &self.source_root.join(OverlayKind::Mods.source_dir_name()),
            &mut report,
        )?;

        let installed_after = count_files(&self.paths.mods_dir);
        Ok(ToggleOutcome {
            action,
            installed_before,
            available,
            installed_after,
            forced: force,
            report,
        })
    }

    /// Overlay tree for one category
    fn tree(&self, kind: OverlayKind) -> OverlayTree {
        let dest_root = match kind {
            OverlayKind::Mods => self.paths.mods_dir.clone(),
            OverlayKind::Overrides | OverlayKind::Additions => self.paths.root.clone(),
        };
        OverlayTree::new(
            kind,
            self.source_root.join(kind.source_dir_name()),
            dest_root,
        )
    }

    fn install(&self, report: &mut ToggleReport) -> Result<()> {
        for kind in OverlayKind::ALL {
            let tree = self.tree(kind);
            let pairs = tree.diff()?;
            debug!(kind = kind.label(), files = pairs.len(), "deploying");
            Deployer::deploy(kind, &pairs, report);
        }
        Ok(())
    }

    fn uninstall(&self, report: &mut ToggleReport) -> Result<()> {
        for kind in OverlayKind::ALL {
            let tree = self.tree(kind);
            let pairs = tree.diff()?;
            debug!(kind = kind.label(), files = pairs.len(), "removing");
            Remover::remove(
                kind,
                &pairs,
                &tree.dest_root,
                &self.paths.runtime_log,
                report,
            );
        }
        Ok(())
    }
}

/// Count files (including placed links) under a directory tree
fn count_files(root: &Path) -> usize {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() || entry.file_type().is_symlink())
        .count()
}

/// Count source mods not carrying the skip marker
fn count_available(root: &Path) -> usize {
    if !root.is_dir() {
        return 0;
    }
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file() || entry.file_type().is_symlink())
        .filter(|entry| !is_skip_marked(entry.path()))
        .count()
}
