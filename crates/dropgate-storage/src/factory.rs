#[cfg(feature = "storage-memory")]
use crate::MemoryBlobStore;
#[cfg(feature = "storage-s3")]
use crate::S3BlobStore;
use crate::{BlobStore, StorageBackend, StorageResult};
use dropgate_core::Config;
use std::sync::Arc;

#[cfg(not(all(feature = "storage-s3", feature = "storage-memory")))]
use crate::StorageError;

/// Create a blob store backend based on configuration
pub fn create_blob_store(config: &Config) -> StorageResult<Arc<dyn BlobStore>> {
    match config.storage_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let store = S3BlobStore::new(
                config.bucket().to_string(),
                config.s3_region.clone(),
                config.s3_endpoint.clone(),
            )?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => Ok(Arc::new(MemoryBlobStore::new(config.bucket()))),

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)".to_string(),
        )),
    }
}
