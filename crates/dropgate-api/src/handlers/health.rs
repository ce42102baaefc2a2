//! Health endpoint.

use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// `GET /healthz`. Liveness only; no dependency checks, so a degraded
/// database never makes the load balancer pull the instance.
pub async fn healthz() -> Json<Value> {
    Json(json!({
        "ok": true,
        "time": Utc::now().to_rfc3339(),
    }))
}
