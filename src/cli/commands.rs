//! CLI command implementations

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{AppConfig, BackendKind};
use crate::filter::PropertyFilter;
use crate::http_server::HttpServer;
use crate::store::{self, seed::migration_listings, ListingStore};

use super::args::Command;

/// Dispatch a parsed command
pub fn run_command(cmd: Command, config: AppConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;

    match cmd {
        Command::Serve { .. } => rt.block_on(serve(config)),
        Command::Seed { force } => rt.block_on(seed(config, force)).map(|_| ()),
    }
}

/// Start the HTTP server and block until shutdown
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let store = store::from_config(&config);
    let server = HttpServer::with_config(config, store);

    server.start().await.context("HTTP server failed")
}

/// Insert the sample listings into the configured store
pub async fn seed(config: AppConfig, force: bool) -> anyhow::Result<usize> {
    if config.backend == BackendKind::Memory {
        warn!("seeding an in-memory store; data is discarded on exit");
    }

    let store = store::from_config(&config);
    seed_store(store.as_ref(), force).await
}

/// Insert the sample listings unless `store` already holds listings.
///
/// Returns how many listings were inserted.
pub async fn seed_store(store: &dyn ListingStore, force: bool) -> anyhow::Result<usize> {
    let existing = store
        .list_properties(&PropertyFilter::default())
        .await
        .context("failed to count existing listings")?
        .len();
    if existing > 0 && !force {
        warn!(
            existing,
            "store already holds listings; rerun with --force to insert anyway"
        );
        return Ok(0);
    }

    let mut inserted = 0;
    for listing in migration_listings() {
        let title = listing.title.clone();
        let property = store
            .create_property(listing)
            .await
            .with_context(|| format!("failed to insert '{}'", title))?;
        info!(id = property.id, titulo = %property.title, "listing inserted");
        inserted += 1;
    }

    info!(inserted, backend = store.backend_name(), "seed complete");
    Ok(inserted)
}
