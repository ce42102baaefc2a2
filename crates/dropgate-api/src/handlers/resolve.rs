//! Short-link resolution handler.
//!
//! `GET /r/{id}` always answers with a 302: to the receiver page carrying
//! the signed download URL, or to the expired page with a `reason`. The 302
//! (not 303) matters for old clients that re-issue the original method.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header::LOCATION, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::constants::{EXPIRED_PAGE, RECEIVER_PAGE};
use crate::services::Resolution;
use crate::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn resolve_link(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.resolver.resolve(&id).await {
        Resolution::Resolved { url } => {
            found(&format!("{RECEIVER_PAGE}?file={}", urlencoding::encode(&url)))
        }
        Resolution::Expired => {
            tracing::info!(id = %id, "Link expired");
            found(&format!(
                "{EXPIRED_PAGE}?reason=expired&ttl={}",
                state.config.link_ttl_hours
            ))
        }
        Resolution::NotFound => {
            tracing::info!(id = %id, "Link not found");
            found(&format!("{EXPIRED_PAGE}?reason=notfound"))
        }
    }
}

fn found(location: &str) -> Response {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .body(axum::body::Body::empty())
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_builds_a_302_with_location() {
        let response = found("/receiver.html?file=x");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/receiver.html?file=x")
        );
    }
}
