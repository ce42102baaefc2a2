//! Shared application state.

use std::sync::Arc;

use dropgate_core::Config;
use dropgate_db::LinkRegistry;
use dropgate_storage::BlobStore;

use crate::services::{LinkService, Resolver};

/// Everything the handlers need, behind one `Arc`.
pub struct AppState {
    pub config: Config,
    pub registry: Arc<dyn LinkRegistry>,
    pub storage: Arc<dyn BlobStore>,
    pub links: LinkService,
    pub resolver: Resolver,
}
