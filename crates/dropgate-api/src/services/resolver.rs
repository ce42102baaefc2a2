//! Link resolution.
//!
//! A `/r/{id}` identifier is either a registry slug or a self-contained
//! signed token (the pre-registry link format). Both resolve to a
//! time-limited signed download URL, or to a verdict the handler turns into
//! the expired / not-found page.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dropgate_core::models::{LinkEntry, TokenPayload};
use dropgate_db::LinkRegistry;
use dropgate_storage::BlobStore;

use crate::utils::link_token;

/// Outcome of resolving an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Valid and live; redirect the client to the signed URL.
    Resolved { url: String },
    /// Unknown identifier, bad signature, or missing object.
    NotFound,
    /// The identifier was valid but its expiry has passed.
    Expired,
}

#[derive(Clone)]
pub struct Resolver {
    registry: Arc<dyn LinkRegistry>,
    storage: Arc<dyn BlobStore>,
    secret: String,
}

impl Resolver {
    pub fn new(registry: Arc<dyn LinkRegistry>, storage: Arc<dyn BlobStore>, secret: String) -> Self {
        Self {
            registry,
            storage,
            secret,
        }
    }

    /// Resolve an identifier to a verdict. Token identifiers contain a `.`
    /// separator, which the base62 slug alphabet can never produce, so the
    /// two formats are disjoint.
    pub async fn resolve(&self, id: &str) -> Resolution {
        if id.contains('.') {
            self.resolve_token(id).await
        } else {
            self.resolve_slug(id).await
        }
    }

    async fn resolve_token(&self, token: &str) -> Resolution {
        let payload = match link_token::decode(token, &self.secret) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                return Resolution::NotFound;
            }
        };

        if payload.is_expired(Utc::now()) {
            return Resolution::Expired;
        }

        // A token minted for another bucket cannot be served by this
        // deployment's store.
        if payload.bucket != self.storage.bucket() {
            tracing::warn!(
                token_bucket = %payload.bucket,
                "Token bucket does not match configured storage"
            );
            return Resolution::NotFound;
        }

        self.sign(&payload.object_key, payload.expires_at).await
    }

    async fn resolve_slug(&self, id: &str) -> Resolution {
        let entry = match self.registry.get(id).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return Resolution::NotFound,
            Err(e) => {
                tracing::error!(error = %e, id = %id, "Registry lookup failed");
                return Resolution::NotFound;
            }
        };

        if entry.is_expired(Utc::now()) {
            self.evict_expired(&entry).await;
            return Resolution::Expired;
        }

        self.sign(&entry.object_key, entry.expires_at.timestamp())
            .await
    }

    /// Sign a download URL valid until the link's expiry. The backend clamps
    /// the window into its `[30 s, 7 d]` range.
    async fn sign(&self, object_key: &str, expires_at: i64) -> Resolution {
        let remaining = (expires_at - Utc::now().timestamp()).max(0) as u64;
        match self
            .storage
            .presigned_url(object_key, Duration::from_secs(remaining))
            .await
        {
            Ok(url) => Resolution::Resolved { url },
            Err(e) => {
                // Covers both a missing object and a signing failure; in
                // either case the link is unusable.
                tracing::warn!(error = %e, key = %object_key, "Could not sign download URL");
                Resolution::NotFound
            }
        }
    }

    /// Best-effort removal of a dead entry and its blob, so an expired link
    /// that is hit before the hourly sweep does not linger.
    async fn evict_expired(&self, entry: &LinkEntry) {
        if let Err(e) = self.storage.delete(&entry.object_key).await {
            tracing::warn!(error = %e, key = %entry.object_key, "Eager blob delete failed");
        }
        if let Err(e) = self.registry.delete(&entry.id).await {
            tracing::warn!(error = %e, id = %entry.id, "Eager registry delete failed");
        }
    }
}
