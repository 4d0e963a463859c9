//! Epic Games launcher manifest lookup
//!
//! The launcher keeps one JSON manifest per installed app under
//! `%ProgramData%/Epic/EpicGamesLauncher/Data/Manifests`. Matching is by
//! the declared display name; unreadable or unrelated files are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ItemManifest {
    display_name: String,
    install_location: PathBuf,
}

/// Locate an app's installation directory through the Epic launcher
pub fn locate(display_name: &str) -> Option<PathBuf> {
    locate_in_dir(&manifests_dir()?, display_name)
}

/// Scan one manifests directory; split out so tests can point it at a
/// synthetic tree.
pub(crate) fn locate_in_dir(dir: &Path, display_name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    for entry in entries.flatten() {
        let path = entry.path();
        let Ok(raw) = fs::read_to_string(&path) else {
            continue;
        };
        let Ok(manifest) = serde_json::from_str::<ItemManifest>(&raw) else {
            continue;
        };
        if manifest.display_name == display_name {
            debug!(manifest = %path.display(), "matched Epic manifest");
            return Some(manifest.install_location);
        }
    }
    None
}

fn manifests_dir() -> Option<PathBuf> {
    let program_data = std::env::var_os("ProgramData")?;
    Some(
        PathBuf::from(program_data)
            .join("Epic")
            .join("EpicGamesLauncher")
            .join("Data")
            .join("Manifests"),
    )
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_matching_manifest_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("other.item"),
            r#"{"DisplayName": "Other Game", "InstallLocation": "C:/Games/Other"}"#,
        )
        .unwrap();
        fs::write(
            tmp.path().join("pd3.item"),
            r#"{"DisplayName": "PAYDAY 3", "InstallLocation": "C:/Games/PAYDAY 3"}"#,
        )
        .unwrap();

        let found = locate_in_dir(tmp.path(), "PAYDAY 3").unwrap();
        assert_eq!(found, PathBuf::from("C:/Games/PAYDAY 3"));
    }

    #[test]
    fn test_unparseable_manifests_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("junk.item"), "not json at all").unwrap();
        fs::write(
            tmp.path().join("pd3.item"),
            r#"{"DisplayName": "PAYDAY 3", "InstallLocation": "/games/pd3"}"#,
        )
        .unwrap();

        assert!(locate_in_dir(tmp.path(), "PAYDAY 3").is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("other.item"),
            r#"{"DisplayName": "Other Game", "InstallLocation": "/games/other"}"#,
        )
        .unwrap();

        assert!(locate_in_dir(tmp.path(), "PAYDAY 3").is_none());
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(locate_in_dir(&tmp.path().join("absent"), "PAYDAY 3").is_none());
    }
}
