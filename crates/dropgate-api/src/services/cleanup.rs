//! Expired-link cleanup sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dropgate_db::LinkRegistry;
use dropgate_storage::BlobStore;

/// Periodically deletes expired links and their blobs.
///
/// Each sweep takes a bounded batch of expired entries and removes the blob
/// first, then the registry row. Failures are logged and skipped; the entry
/// stays for the next sweep, so a flaky backend never wedges the loop.
pub struct CleanupService {
    registry: Arc<dyn LinkRegistry>,
    storage: Arc<dyn BlobStore>,
    interval_secs: u64,
    batch_limit: i64,
}

impl CleanupService {
    pub fn new(
        registry: Arc<dyn LinkRegistry>,
        storage: Arc<dyn BlobStore>,
        interval_secs: u64,
        batch_limit: i64,
    ) -> Self {
        Self {
            registry,
            storage,
            interval_secs,
            batch_limit,
        }
    }

    /// Spawn the background sweep loop.
    pub fn start(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // The first tick fires immediately, clearing anything that
            // expired while the process was down.
            loop {
                interval.tick().await;
                match self.run_once().await {
                    Ok(0) => {}
                    Ok(count) => {
                        tracing::info!(count, "Cleanup removed expired links");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Cleanup sweep failed");
                    }
                }
            }
        });
    }

    /// One sweep over a bounded batch of expired entries. Returns the number
    /// of entries fully removed.
    pub async fn run_once(&self) -> Result<usize, dropgate_core::AppError> {
        let expired = self.registry.expired(Utc::now(), self.batch_limit).await?;
        let mut removed = 0;

        for entry in expired {
            if let Err(e) = self.storage.delete(&entry.object_key).await {
                tracing::warn!(
                    error = %e,
                    id = %entry.id,
                    key = %entry.object_key,
                    "Blob delete failed, keeping entry for next sweep"
                );
                continue;
            }
            if let Err(e) = self.registry.delete(&entry.id).await {
                tracing::warn!(error = %e, id = %entry.id, "Registry delete failed");
                continue;
            }
            removed += 1;
        }

        Ok(removed)
    }
}
