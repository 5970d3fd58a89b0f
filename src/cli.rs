//! Command-line interface for tictactoe_pro.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_pro::Mode;

/// Tic-tac-toe in the terminal, with a three-piece Pro mode
#[derive(Parser, Debug)]
#[command(name = "tictactoe_pro")]
#[command(about = "Terminal tic-tac-toe with Basic and Pro modes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file [default: tictactoe.toml, skipped if absent]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Mode shown after the splash (overrides the config file)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Skip the welcome splash
        #[arg(long)]
        skip_welcome: bool,

        /// Log file path (overrides the config file)
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Apply moves to a fresh game and print the result
    Replay {
        /// Ruleset to replay under
        #[arg(short, long, default_value = "basic")]
        mode: Mode,

        /// Print the board view as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Moves as `row,col` (0-based) or cell numbers 1-9
        #[arg(required = true)]
        moves: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag_is_optional() {
        let cli = Cli::try_parse_from(["tictactoe_pro"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["tictactoe_pro", "replay", "5", "--config", "mine.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("mine.toml")));
        assert!(matches!(cli.command, Some(Command::Replay { .. })));
    }
}
