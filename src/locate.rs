//! Installation path discovery
//!
//! Resolves the game root by trying sources in priority order: the Steam
//! registry/manifest chain, then the Epic launcher's JSON manifests. A
//! source that is simply absent (no registry key, no manifest directory) is
//! a normal "try the next one" outcome, never an error; manual input is the
//! caller's fallback when every source misses.

mod epic;
mod steam;
pub mod vdf;

use std::path::PathBuf;

use tracing::debug;

use crate::game;

/// Which source produced a resolved installation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    /// Steam registry plus app manifest chain
    Steam,
    /// Epic Games launcher manifest scan
    Epic,
    /// Path typed in by the user
    Manual,
}

impl InstallSource {
    /// Human-readable label used in logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steam => "Steam",
            Self::Epic => "Epic",
            Self::Manual => "manual input",
        }
    }
}

/// A resolved installation path and the source that produced it
#[derive(Debug, Clone)]
pub struct ResolvedInstall {
    /// Absolute installation root
    pub path: PathBuf,
    /// Source that produced it
    pub source: InstallSource,
}

/// Try every automatic source in priority order
#[must_use]
pub fn resolve() -> Option<ResolvedInstall> {
    if let Some(path) = steam::locate(game::STEAM_APP_ID) {
        debug!(path = %path.display(), "resolved via Steam manifests");
        return Some(ResolvedInstall {
            path,
            source: InstallSource::Steam,
        });
    }
    if let Some(path) = epic::locate(game::EPIC_DISPLAY_NAME) {
        debug!(path = %path.display(), "resolved via Epic manifests");
        return Some(ResolvedInstall {
            path,
            source: InstallSource::Epic,
        });
    }
    debug!("no launcher manifest matched");
    None
}
