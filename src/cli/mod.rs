//! CLI module
//!
//! Provides command-line interface for:
//! - serve: run the HTTP API (default)
//! - seed: insert the sample listings into the configured store

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::{run_command, seed, seed_store, serve};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Entry point: `.env`, logging, configuration, dispatch
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // A missing .env file is fine
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    cli.apply(&mut config);

    run_command(cli.command(), config)
}
