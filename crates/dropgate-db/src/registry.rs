//! Link registry abstraction trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dropgate_core::models::LinkEntry;
use dropgate_core::AppError;

/// Durable id -> LinkEntry mapping.
///
/// Uniqueness is the registry's job: `insert` must reject a duplicate id
/// atomically, so two concurrent uploads that picked the same slug can never
/// both succeed. The loser retries with a fresh slug.
#[async_trait]
pub trait LinkRegistry: Send + Sync {
    /// Insert a new entry. Fails with `AppError::DuplicateId` if the id is
    /// already present. The check-and-insert is atomic from the caller's
    /// perspective.
    async fn insert(&self, entry: &LinkEntry) -> Result<(), AppError>;

    /// Fetch an entry by id.
    async fn get(&self, id: &str) -> Result<Option<LinkEntry>, AppError>;

    /// Delete an entry. Idempotent: a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Entries whose `expires_at` is at or before `now`, bounded by `limit`.
    /// Used by the cleanup sweep.
    async fn expired(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<LinkEntry>, AppError>;
}
