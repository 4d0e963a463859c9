//! Overlay tree enumeration
//!
//! An overlay tree is a directory of files superimposed onto the target
//! installation. The differ pairs every source file with its destination by
//! re-rooting the source-relative path onto the destination root; it holds
//! no state of its own and a missing or empty source tree is a valid,
//! empty result.

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::error::Result;
use crate::game;

/// Overlay category, listed in the fixed order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Files that replace shipped originals; displaced files are backed up
    Overrides,
    /// Engine-owned files placed alongside the installation's own
    Additions,
    /// Packed mods placed under the engine-owned mods subtree
    Mods,
}

impl OverlayKind {
    /// All categories in application order
    pub const ALL: [Self; 3] = [Self::Overrides, Self::Additions, Self::Mods];

    /// Whether displaced pre-existing files are protected by a backup
    #[must_use]
    pub const fn backs_up(self) -> bool {
        matches!(self, Self::Overrides)
    }

    /// Whether the skip marker suffix excludes files from this category
    #[must_use]
    pub const fn honors_skip_marker(self) -> bool {
        matches!(self, Self::Mods)
    }

    /// Name of the source directory, relative to the tool's working dir
    #[must_use]
    pub const fn source_dir_name(self) -> &'static str {
        match self {
            Self::Overrides => "overrides",
            Self::Additions => "additions",
            Self::Mods => "~mods",
        }
    }

    /// Human-readable label used in logs and reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overrides => "overrides",
            Self::Additions => "additions",
            Self::Mods => "mods",
        }
    }
}

/// One source file mapped to its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// File in the overlay source tree
    pub source: PathBuf,
    /// Where it lands in the installation
    pub dest: PathBuf,
}

/// A source tree plus the destination root it maps onto
#[derive(Debug, Clone)]
pub struct OverlayTree {
    /// Category policy for this tree
    pub kind: OverlayKind,
    /// Root of the source tree
    pub source_root: PathBuf,
    /// Root the source-relative paths are joined onto
    pub dest_root: PathBuf,
}

impl OverlayTree {
    /// Create an overlay tree description
    #[must_use]
    pub const fn new(kind: OverlayKind, source_root: PathBuf, dest_root: PathBuf) -> Self {
        Self {
            kind,
            source_root,
            dest_root,
        }
    }

    /// Enumerate every file in the source tree paired with its destination
    ///
    /// Destinations are computed by joining the source-relative path onto
    /// the destination root, so a source root that is a textual prefix of
    /// an unrelated path can never mis-map.
    ///
    /// # Errors
    ///
    /// Returns an error if the source tree cannot be traversed.
    pub fn diff(&self) -> Result<Vec<FilePair>> {
        if !self.source_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut pairs = Vec::new();
        for entry in WalkDir::new(&self.source_root).follow_links(false) {
            let entry = entry
                .with_context(|| format!("Failed to walk {}", self.source_root.display()))?;
            let file_type = entry.file_type();
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }
            if self.kind.honors_skip_marker() && is_skip_marked(entry.path()) {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.source_root)
                .with_context(|| {
                    format!("Failed to relativize {}", entry.path().display())
                })?;
            pairs.push(FilePair {
                source: entry.path().to_path_buf(),
                dest: self.dest_root.join(rel),
            });
        }

        Ok(pairs)
    }
}

/// Whether a file name carries the disable marker suffix
#[must_use]
pub fn is_skip_marked(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(game::SKIP_SUFFIX))
}
