//! Upload handler: multipart file in, short link out.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{Duration, Utc};
use dropgate_core::models::TokenPayload;
use dropgate_core::{validation, AppError};
use serde::Serialize;

use crate::constants::UPLOAD_FIELD_NAMES;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::{link_token, slug};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    /// Relative short-link path, `/r/{id}`.
    pub receiver_url: String,
    /// Absolute form of `receiver_url`; present when a public base URL is
    /// configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_receiver_url: Option<String>,
    /// Short-link path built on the self-contained signed token for the same
    /// object. Stays resolvable without the registry; pre-registry clients
    /// still consume it.
    pub legacy_id: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if !UPLOAD_FIELD_NAMES.contains(&name.as_str()) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let declared_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Could not read upload: {e}")))?;

        upload = Some((file_name, declared_type, data));
        break;
    }

    let (file_name, declared_type, data) =
        upload.ok_or_else(|| AppError::InvalidInput("No file".to_string()))?;

    // Validate before touching storage.
    validation::check_size(data.len(), state.config.max_upload_size_bytes)?;
    validation::check_mime_prefix(&declared_type)?;

    let clean_name = validation::sanitize_filename(&file_name);
    let content_type = validation::normalize_content_type(&clean_name, &declared_type);

    let object_key = format!(
        "u/{}-{}-{}",
        Utc::now().timestamp_millis(),
        slug::generate(6),
        clean_name
    );

    tracing::info!(
        key = %object_key,
        content_type = %content_type,
        size = data.len(),
        "Storing upload"
    );

    state
        .storage
        .put(&object_key, data.to_vec(), &content_type, false)
        .await?;

    let expires_at = Utc::now() + Duration::seconds(state.config.link_ttl_secs());

    let token = link_token::encode(
        &TokenPayload {
            bucket: state.storage.bucket().to_string(),
            object_key: object_key.clone(),
            expires_at: expires_at.timestamp(),
        },
        &state.config.link_secret,
    );

    // A registry outage must not lose the upload: the blob is already
    // durable, so fall back to the self-contained token as the link id.
    let id = match state
        .links
        .register(state.storage.bucket(), &object_key, expires_at)
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, key = %object_key, "Slug registration failed, serving token link");
            token.clone()
        }
    };

    let receiver_url = format!("{}{}", dropgate_core::constants::RECEIVER_PATH_PREFIX, id);
    let absolute_receiver_url = state
        .config
        .public_base_url
        .as_ref()
        .map(|base| format!("{base}{receiver_url}"));
    let legacy_id = format!(
        "{}{}",
        dropgate_core::constants::RECEIVER_PATH_PREFIX,
        token
    );

    Ok(Json(UploadResponse {
        success: true,
        receiver_url,
        absolute_receiver_url,
        legacy_id,
    }))
}
