//! In-memory link registry for tests.
//!
//! A single map under one lock gives the same atomic insert-or-reject
//! semantics the Postgres backend gets from its primary key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dropgate_core::models::LinkEntry;
use dropgate_core::AppError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::registry::LinkRegistry;

/// In-memory registry backend.
#[derive(Clone, Default)]
pub struct MemoryLinkRegistry {
    entries: Arc<RwLock<HashMap<String, LinkEntry>>>,
}

impl MemoryLinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl LinkRegistry for MemoryLinkRegistry {
    async fn insert(&self, entry: &LinkEntry) -> Result<(), AppError> {
        let mut entries = self.entries.write().expect("registry lock poisoned");
        if entries.contains_key(&entry.id) {
            return Err(AppError::DuplicateId(entry.id.clone()));
        }
        entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<LinkEntry>, AppError> {
        Ok(self
            .entries
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.entries
            .write()
            .expect("registry lock poisoned")
            .remove(id);
        Ok(())
    }

    async fn expired(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<LinkEntry>, AppError> {
        let entries = self.entries.read().expect("registry lock poisoned");
        let mut expired: Vec<LinkEntry> = entries
            .values()
            .filter(|e| e.is_expired(now))
            .cloned()
            .collect();
        expired.sort_by_key(|e| e.expires_at);
        expired.truncate(limit.max(0) as usize);
        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(id: &str, expires_at: DateTime<Utc>) -> LinkEntry {
        LinkEntry {
            id: id.to_string(),
            bucket: "test".to_string(),
            object_key: format!("u/{id}"),
            expires_at,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let registry = MemoryLinkRegistry::new();
        let now = Utc::now();
        registry.insert(&entry("abc123XY", now)).await.unwrap();

        let err = registry
            .insert(&entry("abc123XY", now + Duration::hours(1)))
            .await
            .expect_err("duplicate id must be rejected");
        assert!(matches!(err, AppError::DuplicateId(_)));

        // Original entry untouched.
        let kept = registry.get("abc123XY").await.unwrap().unwrap();
        assert_eq!(kept.expires_at, now);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let registry = MemoryLinkRegistry::new();
        registry.insert(&entry("abc123XY", Utc::now())).await.unwrap();
        registry.delete("abc123XY").await.expect("first delete");
        registry.delete("abc123XY").await.expect("second delete is a no-op");
        registry.delete("never-existed").await.expect("missing id is fine");
        assert!(registry.get("abc123XY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_returns_bounded_oldest_first_batch() {
        let registry = MemoryLinkRegistry::new();
        let now = Utc::now();
        for i in 0..5 {
            registry
                .insert(&entry(&format!("old{i}"), now - Duration::hours(5 - i)))
                .await
                .unwrap();
        }
        registry
            .insert(&entry("live0001", now + Duration::hours(1)))
            .await
            .unwrap();

        let batch = registry.expired(now, 3).await.unwrap();
        assert_eq!(batch.len(), 3);
        assert!(batch.iter().all(|e| e.is_expired(now)));
        assert_eq!(batch[0].id, "old0");

        let all = registry.expired(now, 100).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|e| e.id != "live0001"));
    }
}
