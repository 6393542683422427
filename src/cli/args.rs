//! CLI argument definitions using clap
//!
//! Commands:
//! - propiedades-api [serve] [--seed]
//! - propiedades-api seed [--force]
//!
//! `--host`, `--port` and `--backend` override the environment.

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, BackendKind};

/// Property listings and inquiries REST API
#[derive(Parser, Debug)]
#[command(name = "propiedades-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Host to bind to
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(long, short, global = true)]
    pub port: Option<u16>,

    /// Storage backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendKind>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve {
        /// Load the demo listings into an in-memory store
        #[arg(long)]
        seed: bool,
    },

    /// Insert the sample listings into the configured store and exit
    Seed {
        /// Insert even when the store already holds listings
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The selected command, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { seed: false })
    }

    /// Layer flag values over `config`
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(backend) = self.backend {
            config.backend = backend;
        }
        if let Some(Command::Serve { seed: true }) = self.command {
            config.seed_demo_data = true;
        }
    }
}
