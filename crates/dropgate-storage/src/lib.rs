//! Blob store abstraction and backends.
//!
//! The relay treats object storage as an opaque durable blob store with
//! four operations: put, presigned GET URL, delete, exists. Backends:
//! S3-compatible stores via `object_store`, and an in-memory map for tests.
//!
//! Signed-URL TTLs are always clamped into `[30 s, 7 days]` by the backends
//! themselves, so no caller can mint an effectively permanent URL.

#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod factory;
pub mod traits;

#[cfg(feature = "storage-memory")]
pub use memory::MemoryBlobStore;
#[cfg(feature = "storage-s3")]
pub use s3::S3BlobStore;
pub use dropgate_core::StorageBackend;
pub use factory::create_blob_store;
pub use traits::{clamp_signing_ttl, BlobStore, StorageError, StorageResult};
