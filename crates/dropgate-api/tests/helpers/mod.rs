//! Shared test fixtures: an app wired against in-memory backends.
#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use dropgate_api::setup::{routes, services};
use dropgate_core::{Config, StorageBackend};
use dropgate_db::MemoryLinkRegistry;
use dropgate_storage::MemoryBlobStore;

pub const TEST_SECRET: &str = "test-secret-0123456789";

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        public_base_url: Some("https://share.example.com".to_string()),
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        database_url: "postgresql://unused/test".to_string(),
        storage_backend: StorageBackend::Memory,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        link_secret: TEST_SECRET.to_string(),
        link_ttl_hours: 72,
        max_upload_size_bytes: 26 * 1024 * 1024,
        cleanup_interval_secs: 3600,
        cleanup_batch_limit: 500,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub registry: Arc<MemoryLinkRegistry>,
    pub storage: Arc<MemoryBlobStore>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with_config(test_config())
}

pub fn spawn_app_with_config(config: Config) -> TestApp {
    let registry = Arc::new(MemoryLinkRegistry::new());
    let storage = Arc::new(MemoryBlobStore::new("memory"));

    let state = services::build_state(config.clone(), registry.clone(), storage.clone());
    let router = routes::setup_routes(&config, state).expect("router builds");

    TestApp {
        server: TestServer::new(router).expect("test server"),
        registry,
        storage,
    }
}
