use crate::traits::{clamp_signing_ttl, BlobStore, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutMode, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::time::Duration;

/// S3 blob store implementation
#[derive(Clone)]
pub struct S3BlobStore {
    store: AmazonS3,
    bucket: String,
}

impl S3BlobStore {
    /// Create a new S3BlobStore instance bound to one bucket.
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(
        bucket: String,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket.clone());

        if let Some(region) = region {
            builder = builder.with_region(region);
        }

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3BlobStore { store, bucket })
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
        overwrite: bool,
    ) -> StorageResult<()> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let mode = if overwrite {
            PutMode::Overwrite
        } else {
            PutMode::Create
        };
        let opts = PutOptions {
            mode,
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await;

        result.map_err(|e| match e {
            ObjectStoreError::AlreadyExists { .. } => StorageError::AlreadyExists(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(other.to_string())
            }
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            content_type = %content_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = Path::from(key.to_string());

        // Signing alone does not prove the object exists; probe first so a
        // missing object surfaces as NotFound rather than a dead URL.
        match self.store.head(&location).await {
            Ok(_) => {}
            Err(ObjectStoreError::NotFound { .. }) => {
                return Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => return Err(StorageError::BackendError(e.to_string())),
        }

        let ttl = clamp_signing_ttl(expires_in);
        let url_result: ObjectResult<_> = self.store.signed_url(Method::GET, &location, ttl).await;

        let url = url_result
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 URL signing failed"
                );
                StorageError::BackendError(e.to_string())
            })?
            .to_string();

        Ok(url)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(_) => {
                tracing::info!(
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete successful"
                );
                Ok(())
            }
            // Deleting a missing object is a no-op.
            Err(ObjectStoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                Err(StorageError::DeleteFailed(e.to_string()))
            }
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let location = Path::from(key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
