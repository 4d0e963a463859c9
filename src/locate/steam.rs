//! Steam installation lookup
//!
//! Reads the Steam root from the registry (Windows) or the usual home
//! locations (Unix), then searches app manifests the way the launcher
//! declares them: the primary steamapps directory first, then every
//! library listed in `libraryfolders.vdf`, in declared order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::vdf;

/// Locate an app's installation directory through Steam
pub fn locate(app_id: &str) -> Option<PathBuf> {
    let steam_root = steam_root()?;
    debug!(path = %steam_root.display(), "found Steam root");
    locate_in_root(&steam_root, app_id)
}

/// Search one Steam root; split out so tests can point it at a synthetic
/// tree.
pub(crate) fn locate_in_root(steam_root: &Path, app_id: &str) -> Option<PathBuf> {
    let steamapps = steam_root.join("steamapps");
    if let Some(path) = install_from_manifest(&steamapps, app_id) {
        return Some(path);
    }

    // Not in the primary library: consult the declared library folders.
    let raw = fs::read_to_string(steamapps.join("libraryfolders.vdf")).ok()?;
    let parsed = vdf::parse(&raw).ok()?;
    let folders = parsed.get_table("libraryfolders")?;
    for (key, value) in folders.iter() {
        // "0" is the primary library, already searched above.
        if key == "0" {
            continue;
        }
        let vdf::Value::Table(folder) = value else {
            continue;
        };
        let Some(apps) = folder.get_table("apps") else {
            continue;
        };
        if apps.get(app_id).is_none() {
            continue;
        }
        let Some(library_path) = folder.get_str("path") else {
            continue;
        };
        if let Some(install) =
            install_from_manifest(&Path::new(library_path).join("steamapps"), app_id)
        {
            return Some(install);
        }
    }

    None
}

/// Read `appmanifest_<id>.acf` under one steamapps directory and resolve
/// the declared install subdirectory, if it exists on disk.
fn install_from_manifest(steamapps: &Path, app_id: &str) -> Option<PathBuf> {
    let raw = fs::read_to_string(steamapps.join(format!("appmanifest_{app_id}.acf"))).ok()?;
    let parsed = vdf::parse(&raw).ok()?;
    let state = parsed.get_table("AppState")?;
    let installdir = state.get_str("installdir")?;
    let install = steamapps.join("common").join(installdir);
    install.is_dir().then_some(install)
}

#[cfg(windows)]
fn steam_root() -> Option<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm.open_subkey(r"SOFTWARE\WOW6432Node\Valve\Steam").ok()?;
    let path: String = key.get_value("InstallPath").ok()?;
    let path = PathBuf::from(path);
    path.is_dir().then_some(path)
}

#[cfg(not(windows))]
fn steam_root() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    [home.join(".local/share/Steam"), home.join(".steam/steam")]
        .into_iter()
        .find(|candidate| candidate.is_dir())
}
