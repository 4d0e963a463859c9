mod cli;

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use modtoggle::engine::{ToggleEngine, ToggleReporter};
use modtoggle::error::ToggleError;
use modtoggle::game::{self, GamePaths};
use modtoggle::locate;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    println!("===| modtoggle |===");

    let game_root = resolve_game_root(cli.game_path)?;
    let source_root = match cli.source_dir {
        Some(dir) => dir,
        None => env::current_dir().context("Failed to resolve current directory")?,
    };

    let paths = GamePaths::new(game_root);
    debug!(root = %paths.root.display(), "game root");
    debug!(source = %source_root.display(), "source root");

    let engine = ToggleEngine::new(paths, source_root, cli.force);
    let outcome = engine.run()?;

    // Per-file failures are surfaced in the summary; a run that completed
    // still exits zero. Only resolution and validation failures are fatal.
    print!("{}", ToggleReporter::generate_summary(&outcome));
    Ok(())
}

/// Find the installation root: explicit flag first, then launcher
/// auto-detection, then a manual prompt. Whatever the origin, the root
/// must carry the marker executable.
fn resolve_game_root(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        validate(&path)?;
        return Ok(path);
    }

    if let Some(install) = locate::resolve() {
        println!(
            "Found {} installation: {}",
            install.source.label(),
            install.path.display()
        );
        validate(&install.path)?;
        return Ok(install.path);
    }

    let path = prompt_for_path()?;
    validate(&path)?;
    Ok(path)
}

fn validate(path: &std::path::Path) -> anyhow::Result<()> {
    if !path.is_dir() {
        return Err(ToggleError::MissingGameDir(path.to_path_buf()).into());
    }
    if !game::looks_like_game_root(path) {
        return Err(ToggleError::InvalidGameDir {
            path: path.to_path_buf(),
            marker: game::MARKER_EXE,
        }
        .into());
    }
    Ok(())
}

fn prompt_for_path() -> anyhow::Result<PathBuf> {
    print!(
        "Game path not found, please enter the path to the game (where {} is): ",
        game::MARKER_EXE
    );
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read path from stdin")?;
    Ok(PathBuf::from(line.trim()))
}

fn init_tracing(debug: bool) {
    let default_filter = if debug { "modtoggle=debug" } else { "modtoggle=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
