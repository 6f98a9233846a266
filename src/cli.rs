//! Command-line interface for slide_client.

use clap::{Parser, Subcommand};

/// Slide Client - terminal front end for a server-authoritative 2048 game
#[derive(Parser, Debug)]
#[command(name = "slide_client")]
#[command(about = "Play a server-hosted 2048 game from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "slide_client.toml")]
    pub config: std::path::PathBuf,

    /// Game server URL, overriding config and environment
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Start from this JSON board instead of the server page, e.g. '[[0,2],[4,0]]'
        #[arg(long)]
        initial_board: Option<String>,

        /// Fail requests that take longer than this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Print the high-score table
    Scores,
}
