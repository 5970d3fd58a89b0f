//! tictactoe_pro - terminal tic-tac-toe
//!
//! Plays in the terminal UI by default; `replay` applies moves headlessly.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tictactoe_pro::{
    AppConfig, BoardRenderer, DEFAULT_CONFIG_FILE, DEFAULT_LOG_FILTER, Mode, ModeSession,
    TextRenderer, tui,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load {}", path.display()),
        None => format!("Failed to load {}", DEFAULT_CONFIG_FILE),
    })?;

    match cli.command.unwrap_or(Command::Play {
        mode: None,
        skip_welcome: false,
        log_file: None,
    }) {
        Command::Play {
            mode,
            skip_welcome,
            log_file,
        } => {
            let mut config = config;
            if let Some(mode) = mode {
                config = config.with_start_mode(mode);
            }
            if skip_welcome {
                config = config.with_show_welcome(false);
            }
            if let Some(log_file) = log_file {
                config = config.with_log_file(log_file);
            }
            tui::run_tui(config).await
        }
        Command::Replay { mode, json, moves } => run_replay(mode, json, &moves),
    }
}

/// Replays `moves` on a fresh session and prints the final board.
#[instrument(skip(moves))]
fn run_replay(mode: Mode, json: bool, moves: &[String]) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(%mode, count = moves.len(), "Replaying moves");
    let mut session = ModeSession::new(mode);
    for error in session.replay(moves.iter().map(String::as_str)) {
        warn!(%error, "Move skipped");
        eprintln!("skipped: {}", error);
    }

    let view = session.view();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize board view")?
        );
    } else {
        let mut renderer = TextRenderer::new();
        renderer.render(&view)?;
        print!("{}", renderer.take());
    }
    Ok(())
}
