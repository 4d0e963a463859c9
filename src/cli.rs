//! Command-line interface definitions

use std::path::PathBuf;

use clap::Parser;

/// Toggle an overlay of mods on and off a PAYDAY 3 installation
#[derive(Parser, Debug)]
#[command(name = "modtoggle", about, version)]
pub struct Cli {
    /// Force an install even when mods are currently installed
    #[arg(short, long)]
    pub force: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Installation root (the directory holding PAYDAY3Client.exe);
    /// skips launcher auto-detection
    #[arg(long, value_name = "PATH")]
    pub game_path: Option<PathBuf>,

    /// Directory holding the overrides, additions and ~mods source trees
    /// (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub source_dir: Option<PathBuf>,
}
