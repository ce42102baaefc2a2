//! In-memory blob store for tests and local development.
//!
//! Objects live in a process-local map. Presigned URLs use a `memory://`
//! scheme carrying the clamped TTL, which is enough for tests to assert
//! signing behavior without a real backend.

use crate::traits::{clamp_signing_ttl, BlobStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

#[derive(Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
}

/// In-memory blob store implementation
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        MemoryBlobStore {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Raw object bytes, for test assertions.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .read()
            .expect("blob map lock poisoned")
            .get(key)
            .map(|o| o.data.to_vec())
    }

    /// Stored content type, for test assertions.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .expect("blob map lock poisoned")
            .get(key)
            .map(|o| o.content_type.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.read().expect("blob map lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> StorageResult<()> {
        let mut objects = self.objects.write().expect("blob map lock poisoned");
        if !overwrite && objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                data: Bytes::from(data),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let objects = self.objects.read().expect("blob map lock poisoned");
        if !objects.contains_key(key) {
            return Err(StorageError::NotFound(key.to_string()));
        }
        let ttl = clamp_signing_ttl(expires_in);
        Ok(format!(
            "memory://{}/{}?expires_in={}",
            self.bucket,
            key,
            ttl.as_secs()
        ))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects
            .write()
            .expect("blob map lock poisoned")
            .remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self
            .objects
            .read()
            .expect("blob map lock poisoned")
            .contains_key(key))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_without_overwrite_rejects_existing_key() {
        let store = MemoryBlobStore::new("test");
        store
            .put("u/1-a.png", vec![1, 2, 3], "image/png", false)
            .await
            .expect("first put");

        let err = store
            .put("u/1-a.png", vec![4, 5], "image/png", false)
            .await
            .expect_err("second put must fail");
        assert!(matches!(err, StorageError::AlreadyExists(_)));

        // Content unchanged by the failed write.
        assert_eq!(store.get("u/1-a.png"), Some(vec![1, 2, 3]));

        store
            .put("u/1-a.png", vec![9], "image/png", true)
            .await
            .expect("overwrite allowed when requested");
        assert_eq!(store.get("u/1-a.png"), Some(vec![9]));
    }

    #[test]
    fn reports_memory_backend_and_bucket() {
        let store = MemoryBlobStore::new("test");
        assert_eq!(store.backend_type(), StorageBackend::Memory);
        assert_eq!(store.bucket(), "test");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryBlobStore::new("test");
        store
            .put("u/1-a.png", vec![1], "image/png", false)
            .await
            .unwrap();
        store.delete("u/1-a.png").await.expect("first delete");
        store.delete("u/1-a.png").await.expect("second delete is a no-op");
        assert!(!store.exists("u/1-a.png").await.unwrap());
    }

    #[tokio::test]
    async fn presigned_url_requires_existing_object() {
        let store = MemoryBlobStore::new("test");
        let err = store
            .presigned_url("missing", Duration::from_secs(60))
            .await
            .expect_err("missing object");
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn presigned_url_carries_clamped_ttl() {
        let store = MemoryBlobStore::new("test");
        store
            .put("u/1-a.png", vec![1], "image/png", false)
            .await
            .unwrap();

        // 1 second remaining is raised to the 30-second floor.
        let url = store
            .presigned_url("u/1-a.png", Duration::from_secs(1))
            .await
            .unwrap();
        assert!(url.ends_with("expires_in=30"), "got {url}");

        // 30 days is capped at 7 days.
        let url = store
            .presigned_url("u/1-a.png", Duration::from_secs(30 * 24 * 3600))
            .await
            .unwrap();
        assert!(url.ends_with(&format!("expires_in={}", 7 * 24 * 3600)), "got {url}");
    }
}
