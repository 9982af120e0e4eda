//! Object storage for uploaded supplier files.
//!
//! Uploads are grouped into logical buckets ("logos", "products",
//! "catalogs"); how a backend maps those onto physical storage is its own
//! concern.

use async_trait::async_trait;
use thiserror::Error;

pub mod local;
pub mod s3;

pub use local::LocalStorage;
pub use s3::S3Storage;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob-store collaborator: named byte buffers in, public URLs out.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload bytes under `bucket`/`key` and return the publicly
    /// resolvable URL of the stored object.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Public URL for an object previously stored under `bucket`/`key`.
    fn public_url(&self, bucket: &str, key: &str) -> String;
}
