//! Terminal UI for tic-tac-toe.

mod controller;
mod input;
mod screen;
mod screens;
mod timeline;
mod ui;
mod welcome;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tracing::{error, info, instrument};

pub use controller::AppController;
pub use input::{digit_cell, hit_test, move_cursor};
pub use screen::{Screen, ScreenTransition};
pub use screens::{BoardScreen, WelcomeScreen, notice_for};
pub use timeline::{Easing, Repeat, Timeline, Tween};
pub use ui::{FrameRenderer, MIN_BOARD_AREA, center_rect, draw_nav_bar, fade};
pub use welcome::{Element, ElementState, Property, WelcomeCue, WelcomeSequence};

use crate::config::AppConfig;

/// Runs the terminal UI until the user quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Log to a file so output does not corrupt the terminal.
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(crate::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?config, "Starting tic-tac-toe TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &config).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
) -> Result<()> {
    let mut app = AppController::new(*config.start_mode(), *config.show_welcome());
    app.run(terminal, config.tick()).await
}
