//! Slide Client - terminal front end for a server-authoritative 2048 game.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use slide_client::{ClientConfig, HighScoreSyncer, HttpTransport, ScreenState, lock_view, shared};
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(&cli.config)?;
    if let Some(url) = cli.server_url {
        config = config.with_server_url(url);
    }

    match cli.command {
        Command::Play {
            initial_board,
            timeout_ms,
        } => {
            if let Some(board) = initial_board {
                config = config.with_initial_board(board);
            }
            if let Some(timeout_ms) = timeout_ms {
                config = config.with_request_timeout_ms(timeout_ms);
            }
            config.validate()?;
            slide_client::run_tui(config).await
        }
        Command::Scores => {
            config.validate()?;
            print_scores(config).await
        }
    }
}

/// Fetch the high-score table once and print it.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn print_scores(config: ClientConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Fetching high scores");

    let transport = Arc::new(HttpTransport::new(
        config.server_url(),
        config.request_timeout(),
    )?);
    let view = shared(ScreenState::new());
    HighScoreSyncer::new(transport, Arc::clone(&view))
        .refresh()
        .await?;

    let screen = lock_view(&view);
    println!("{}", screen.high_score_banner());
    for (i, entry) in screen.high_scores().iter().enumerate() {
        println!("{:>2}. {}", i + 1, entry);
    }
    Ok(())
}
