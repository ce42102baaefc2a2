//! Application setup and initialization
//!
//! Startup logic lives here rather than in main.rs, so tests can assemble
//! the same router against in-memory backends.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;

use std::sync::Arc;

use anyhow::{Context, Result};
use dropgate_core::Config;
use dropgate_storage::BlobStore;

use crate::services::CleanupService;
use crate::state::AppState;

/// Initialize the entire application: database, storage, services, routes,
/// and the background cleanup sweep.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let pool = database::setup_database(&config).await?;

    let storage =
        dropgate_storage::create_blob_store(&config).context("Failed to initialize blob storage")?;
    tracing::info!(
        backend = ?storage.backend_type(),
        bucket = %storage.bucket(),
        "Blob storage initialized"
    );

    let registry = Arc::new(dropgate_db::PgLinkRegistry::new(pool));
    let state = services::build_state(config, registry, storage);

    let cleanup = Arc::new(CleanupService::new(
        state.registry.clone(),
        state.storage.clone(),
        state.config.cleanup_interval_secs,
        state.config.cleanup_batch_limit,
    ));
    cleanup.start();

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
