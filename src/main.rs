//! `inchdesk`: a headless desk board driven from the command line.
//!
//! Every invocation hydrates the board from the data directory, runs one
//! command while a background task flushes changes, then flushes once more
//! before exit.

mod ai;
mod commands;
mod config;
mod services;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use board::clock::SystemClock;
use board::content::ContentError;
use board::export::ExportError;
use board::storage::FileStorage;
use board::store::FlushError;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::ai::{AiError, HttpAiClient};
use crate::config::{AppConfig, ConfigError, DEFAULT_LOG_FILTER};
use crate::services::ai::DecomposeError;
use crate::services::persistence;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("AI client setup failed: {0}")]
    Ai(#[from] AiError),
    #[error("no node with id {0}")]
    NodeNotFound(String),
    #[error("{source}; pass --force to store it anyway")]
    ContentRejected {
        #[source]
        source: ContentError,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("saving board failed: {0}")]
    Flush(#[from] FlushError),
    #[error(transparent)]
    Decompose(#[from] DecomposeError),
}

#[derive(Parser, Debug)]
#[command(name = "inchdesk", about = "Desk board of widget cards")]
struct Cli {
    /// Directory holding the persisted board.
    #[arg(long, env = "INCHDESK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(&config.log_filter);

    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let ai = Arc::new(HttpAiClient::new(&config.ai)?);
    info!(data_dir = %config.data_dir.display(), ai_url = %ai.url(), "inchdesk: starting");
    let state = AppState::hydrate(storage, ai, Arc::new(SystemClock));

    let flusher = persistence::spawn_persistence_task(state.clone(), config.flush_interval);
    let result = commands::run(&state, &config, cli.command).await;
    flusher.abort();

    // Save whatever the command managed to change, even when it failed.
    let flushed = persistence::flush(&state).await;
    if let Err(e) = &flushed {
        error!(error = %e, "inchdesk: final flush failed");
    }
    let output = result?;
    flushed?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to stderr; stdout carries command output.
fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("inchdesk: invalid log filter '{filter}' ({e}), using '{DEFAULT_LOG_FILTER}'");
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
