//! Error types for the toggle engine

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Fatal conditions that stop a run before the destination tree is touched
#[derive(Debug, Error)]
pub enum ToggleError {
    /// The resolved or user-supplied path does not exist on disk
    #[error("game path does not exist: {0}")]
    MissingGameDir(PathBuf),

    /// The path exists but does not contain the marker executable
    #[error("game path is not correct (missing {marker}): {path}")]
    InvalidGameDir {
        /// Path that failed validation
        path: PathBuf,
        /// Marker executable that was expected at the root
        marker: &'static str,
    },
}
