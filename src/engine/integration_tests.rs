//! Full-cycle tests driving the engine against synthetic installations

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{ToggleAction, ToggleEngine, backup_path};
use crate::game::GamePaths;

struct Fixture {
    _tmp: TempDir,
    paths: GamePaths,
    source_root: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let game_root = tmp.path().join("game");
        let source_root = tmp.path().join("workdir");
        fs::create_dir_all(game_root.join("PAYDAY3/Binaries/Win64")).unwrap();
        fs::write(game_root.join("PAYDAY3Client.exe"), "binary").unwrap();
        fs::create_dir_all(&source_root).unwrap();
        Self {
            paths: GamePaths::new(game_root),
            source_root,
            _tmp: tmp,
        }
    }

    fn write_source(&self, category: &str, rel: &str, content: &str) {
        let path = self.source_root.join(category).join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_game(&self, rel: &str, content: &str) {
        let path = self.paths.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn game_file(&self, rel: &str) -> PathBuf {
        self.paths.root.join(rel)
    }

    fn run(&self, force: bool) -> super::ToggleOutcome {
        ToggleEngine::new(self.paths.clone(), self.source_root.clone(), force)
            .run()
            .unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_first_run_with_empty_sources_installs_nothing() {
    let fx = Fixture::new();
    let outcome = fx.run(false);

    assert_eq!(outcome.action, ToggleAction::Install);
    assert!(outcome.forced);
    assert_eq!(outcome.installed_after, 0);
    assert!(outcome.report.is_success());
    assert!(fx.paths.mods_dir.is_dir());
}

#[test]
fn test_install_then_uninstall_cycle() {
    let fx = Fixture::new();
    fx.write_source("~mods", "a.pak", "mod a");

    let install = fx.run(false);
    assert_eq!(install.action, ToggleAction::Install);
    assert_eq!(install.installed_after, 1);
    assert_eq!(read(&fx.paths.mods_dir.join("a.pak")), "mod a");

    let uninstall = fx.run(false);
    assert_eq!(uninstall.action, ToggleAction::Uninstall);
    assert!(!uninstall.forced);
    assert_eq!(uninstall.installed_after, 0);

    let reinstall = fx.run(false);
    assert_eq!(reinstall.action, ToggleAction::Install);
    assert_eq!(reinstall.installed_after, 1);
}

#[test]
fn test_forced_reinstall_keeps_single_backup() {
    let fx = Fixture::new();
    fx.write_game("PAYDAY3/Content/Splash/splash.bmp", "shipped");
    fx.write_source("overrides", "PAYDAY3/Content/Splash/splash.bmp", "custom");
    fx.write_source("~mods", "a.pak", "mod a");

    fx.run(false);
    let dest = fx.game_file("PAYDAY3/Content/Splash/splash.bmp");
    assert_eq!(read(&dest), "custom");
    assert_eq!(read(&backup_path(&dest)), "shipped");

    // Forced second install must not clobber the preserved original.
    let second = fx.run(true);
    assert_eq!(second.action, ToggleAction::Install);
    assert!(second.forced);
    assert_eq!(second.report.backed_up, 0);
    assert_eq!(read(&backup_path(&dest)), "shipped");
}

#[test]
fn test_uninstall_restores_originals_byte_identical() {
    let fx = Fixture::new();
    fx.write_game("PAYDAY3/Content/data.cfg", "original bytes");
    fx.write_source("overrides", "PAYDAY3/Content/data.cfg", "patched");
    fx.write_source("additions", "PAYDAY3/Binaries/Win64/dwmapi.dll", "loader");
    fx.write_source("~mods", "a.pak", "mod a");

    fx.run(false);
    let uninstall = fx.run(false);

    assert_eq!(uninstall.action, ToggleAction::Uninstall);
    let dest = fx.game_file("PAYDAY3/Content/data.cfg");
    assert_eq!(read(&dest), "original bytes");
    assert!(!backup_path(&dest).exists());
    assert!(!fx.game_file("PAYDAY3/Binaries/Win64/dwmapi.dll").exists());
    assert_eq!(uninstall.installed_after, 0);
}

#[test]
fn test_count_mismatch_forces_install_instead_of_uninstall() {
    let fx = Fixture::new();
    fx.write_source("~mods", "a.pak", "mod a");
    fx.run(false);

    // A mod added between runs would normally flip to uninstall; the
    // count mismatch repairs instead.
    fx.write_source("~mods", "b.pak", "mod b");
    let outcome = fx.run(false);

    assert_eq!(outcome.action, ToggleAction::Install);
    assert!(outcome.forced);
    assert_eq!(outcome.installed_after, 2);
}

#[test]
fn test_skip_marked_mods_are_never_deployed() {
    let fx = Fixture::new();
    fx.write_source("~mods", "a.pak", "mod a");
    fx.write_source("~mods", "b.pak.skip", "disabled");

    let outcome = fx.run(false);
    assert_eq!(outcome.available, 1);
    assert!(fx.paths.mods_dir.join("a.pak").exists());
    assert!(!fx.paths.mods_dir.join("b.pak.skip").exists());
    assert!(!fx.paths.mods_dir.join("b.pak").exists());
}

#[test]
fn test_source_deletion_converges_via_reconcile() {
    let fx = Fixture::new();
    fx.write_source("~mods", "a.pak", "mod a");
    fx.write_source("~mods", "deep/nested/b.pak", "mod b");
    fx.run(false);
    assert!(fx.paths.mods_dir.join("deep/nested/b.pak").exists());

    fs::remove_file(fx.source_root.join("~mods/deep/nested/b.pak")).unwrap();
    fs::remove_dir_all(fx.source_root.join("~mods/deep")).unwrap();
    let outcome = fx.run(false);

    assert!(outcome.report.orphans_removed >= 1);
    assert!(!fx.paths.mods_dir.join("deep").exists());
    assert!(fx.paths.mods_dir.join("a.pak").exists());
    assert_eq!(outcome.installed_after, 1);
}

#[test]
fn test_unbacked_override_survives_uninstall_with_warning() {
    let fx = Fixture::new();
    fx.write_source("overrides", "PAYDAY3/Content/data.cfg", "patched");
    fx.write_source("~mods", "a.pak", "mod a");
    fx.run(false);

    // Destination file existed only via deployment onto an absent
    // original, so there is no backup; simulate a manually deleted one.
    let dest = fx.game_file("PAYDAY3/Content/data.cfg");
    assert!(dest.exists());
    assert!(!backup_path(&dest).exists());

    let uninstall = fx.run(false);
    assert_eq!(uninstall.action, ToggleAction::Uninstall);
    assert!(dest.exists());
    assert!(!uninstall.report.warnings.is_empty());
    assert!(uninstall.report.is_success());
}

#[test]
fn test_runtime_log_is_deleted_on_uninstall() {
    let fx = Fixture::new();
    fx.write_game("PAYDAY3/Content/data.cfg", "original");
    fx.write_source("overrides", "PAYDAY3/Content/data.cfg", "patched");
    fx.write_source("~mods", "a.pak", "mod a");
    fx.run(false);
    fs::write(&fx.paths.runtime_log, "runtime output").unwrap();

    fx.run(false);
    assert!(!fx.paths.runtime_log.exists());
}

#[test]
fn test_uninstall_prunes_emptied_mod_dirs() {
    let fx = Fixture::new();
    fx.write_source("~mods", "pack/a.pak", "mod a");
    fx.run(false);
    assert!(fx.paths.mods_dir.join("pack/a.pak").exists());

    let uninstall = fx.run(false);
    assert_eq!(uninstall.action, ToggleAction::Uninstall);
    assert!(!fx.paths.mods_dir.join("pack").exists());
    assert!(fx.paths.mods_dir.exists());
}
