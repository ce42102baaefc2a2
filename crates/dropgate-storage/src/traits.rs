//! Blob store abstraction trait
//!
//! This module defines the BlobStore trait that all storage backends must
//! implement, plus the signing-TTL clamp shared by every backend.

use async_trait::async_trait;
use dropgate_core::StorageBackend;
use std::time::Duration;
use thiserror::Error;

/// Shortest signed-URL lifetime a backend will issue. A link that is about
/// to expire still gets a usable download window.
pub const MIN_SIGNING_TTL: Duration = Duration::from_secs(30);

/// Longest signed-URL lifetime a backend will issue, regardless of how far
/// away the link's nominal expiry is.
pub const MAX_SIGNING_TTL: Duration = Duration::from_secs(7 * 24 * 3600);

/// Clamp a requested signing TTL into `[MIN_SIGNING_TTL, MAX_SIGNING_TTL]`.
pub fn clamp_signing_ttl(requested: Duration) -> Duration {
    requested.clamp(MIN_SIGNING_TTL, MAX_SIGNING_TTL)
}

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store abstraction trait
///
/// All backends (S3-compatible, in-memory) implement this trait so the
/// resolver and upload path never couple to a concrete provider. A backend
/// instance is bound to a single bucket, which acts as the logical
/// namespace for its keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store an object under `key`.
    ///
    /// With `overwrite = false` an existing object is never replaced; the
    /// call fails with `StorageError::AlreadyExists` instead.
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> StorageResult<()>;

    /// Generate a time-limited URL granting read access to `key`.
    ///
    /// Fails with `NotFound` if the object does not exist. `expires_in` is
    /// clamped into `[MIN_SIGNING_TTL, MAX_SIGNING_TTL]` before signing.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Delete an object. Idempotent: a missing object is not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Bucket this backend is bound to.
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
