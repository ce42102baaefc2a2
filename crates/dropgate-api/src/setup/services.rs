//! Service wiring.

use std::sync::Arc;

use dropgate_core::Config;
use dropgate_db::LinkRegistry;
use dropgate_storage::BlobStore;

use crate::services::{LinkService, Resolver};
use crate::state::AppState;

/// Assemble the shared state from a registry and blob store. Production
/// passes Postgres and S3; tests pass the in-memory backends.
pub fn build_state(
    config: Config,
    registry: Arc<dyn LinkRegistry>,
    storage: Arc<dyn BlobStore>,
) -> Arc<AppState> {
    let links = LinkService::new(registry.clone());
    let resolver = Resolver::new(
        registry.clone(),
        storage.clone(),
        config.link_secret.clone(),
    );

    Arc::new(AppState {
        config,
        registry,
        storage,
        links,
        resolver,
    })
}
