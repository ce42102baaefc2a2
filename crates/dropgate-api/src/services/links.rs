//! Short-link registration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dropgate_core::constants::{SLUG_LENGTH, SLUG_LENGTH_WIDE, SLUG_MAX_ATTEMPTS};
use dropgate_core::models::LinkEntry;
use dropgate_core::AppError;
use dropgate_db::LinkRegistry;

use crate::utils::slug;

/// Registers uploaded objects under fresh short slugs.
#[derive(Clone)]
pub struct LinkService {
    registry: Arc<dyn LinkRegistry>,
}

impl LinkService {
    pub fn new(registry: Arc<dyn LinkRegistry>) -> Self {
        Self { registry }
    }

    /// Create a registry entry for an uploaded object and return its slug.
    ///
    /// Collisions are absorbed by retrying with a fresh slug: up to
    /// `SLUG_MAX_ATTEMPTS` inserts at the default length, then one final
    /// attempt at the widened length. At 62^8 the retries almost never
    /// trigger; the widened attempt failing too means something other than
    /// chance is wrong and the error surfaces.
    pub async fn register(
        &self,
        bucket: &str,
        object_key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        for _ in 0..SLUG_MAX_ATTEMPTS {
            let id = slug::generate(SLUG_LENGTH);
            match self.try_insert(&id, bucket, object_key, expires_at).await {
                Ok(()) => return Ok(id),
                Err(AppError::DuplicateId(_)) => {
                    tracing::warn!(id = %id, "Slug collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        let id = slug::generate(SLUG_LENGTH_WIDE);
        tracing::warn!(id = %id, "Repeated slug collisions, widened to {SLUG_LENGTH_WIDE} chars");
        self.try_insert(&id, bucket, object_key, expires_at).await?;
        Ok(id)
    }

    async fn try_insert(
        &self,
        id: &str,
        bucket: &str,
        object_key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let entry = LinkEntry {
            id: id.to_string(),
            bucket: bucket.to_string(),
            object_key: object_key.to_string(),
            expires_at,
        };
        self.registry.insert(&entry).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropgate_db::MemoryLinkRegistry;

    #[tokio::test]
    async fn register_returns_a_default_length_slug() {
        let registry = Arc::new(MemoryLinkRegistry::new());
        let service = LinkService::new(registry.clone());

        let expires = Utc::now() + chrono::Duration::hours(72);
        let id = service
            .register("media", "u/1-x-clip.mp4", expires)
            .await
            .expect("register");

        assert_eq!(id.len(), SLUG_LENGTH);
        let entry = registry.get(&id).await.expect("get").expect("entry");
        assert_eq!(entry.object_key, "u/1-x-clip.mp4");
        assert_eq!(entry.expires_at, expires);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_registrations_get_distinct_slugs() {
        let registry = Arc::new(MemoryLinkRegistry::new());
        let service = LinkService::new(registry.clone());
        let expires = Utc::now() + chrono::Duration::hours(1);

        let handles: Vec<_> = (0..100)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .register("media", &format!("u/{i}-file"), expires)
                        .await
                })
            })
            .collect();

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let id = handle.await.expect("task").expect("register");
            assert!(ids.insert(id), "two in-flight registrations shared an id");
        }
        assert_eq!(registry.len(), 100);
    }
}
