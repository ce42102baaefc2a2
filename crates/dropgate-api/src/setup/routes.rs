//! Route configuration and setup

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use dropgate_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::constants::NOT_FOUND_PAGE;
use crate::handlers;
use crate::state::AppState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Multipart framing overhead allowed on top of the file-size limit; the
/// file itself is checked against the exact limit in the handler.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route("/r/{id}", get(handlers::resolve::resolve_link))
        .route("/healthz", get(handlers::health::healthz))
        .fallback(|| async { (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)) })
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(DefaultBodyLimit::max(
            config.max_upload_size_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {o}"))
            })
            .collect::<Result<_, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
