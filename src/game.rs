//! Game-specific constants and path layout
//!
//! Everything the engine knows about PAYDAY 3 lives here; the rest of the
//! crate works purely in terms of resolved paths.

use std::path::{Path, PathBuf};

/// Steam application id for PAYDAY 3
pub const STEAM_APP_ID: &str = "1272080";

/// Display name declared in the Epic Games launcher manifests
pub const EPIC_DISPLAY_NAME: &str = "PAYDAY 3";

/// Executable that must exist at the root of a valid installation
pub const MARKER_EXE: &str = "PAYDAY3Client.exe";

/// Suffix appended to a displaced original file's name
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix marking a mod package as excluded from toggling
pub const SKIP_SUFFIX: &str = ".skip";

/// Resolved path layout of one game installation
#[derive(Debug, Clone)]
pub struct GamePaths {
    /// Installation root (the directory holding the marker executable)
    pub root: PathBuf,
    /// Engine-owned packed mods subtree under the root
    pub mods_dir: PathBuf,
    /// Log file written by the mod-loading runtime; cleaned up on uninstall
    pub runtime_log: PathBuf,
}

impl GamePaths {
    /// Build the path layout for an installation root
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        let mods_dir = root
            .join("PAYDAY3")
            .join("Content")
            .join("Paks")
            .join("~mods");
        let runtime_log = root
            .join("PAYDAY3")
            .join("Binaries")
            .join("Win64")
            .join("UE4SS.log");
        Self {
            root,
            mods_dir,
            runtime_log,
        }
    }
}

/// Whether a path looks like a valid installation root
#[must_use]
pub fn looks_like_game_root(path: &Path) -> bool {
    path.join(MARKER_EXE).is_file()
}
