use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::storage::{ObjectStorage, StorageError, StorageResult};

/// Local filesystem backend, for deployments without object storage and
/// for development. Files land under `base_path/<bucket>/<key>` and are
/// served from `base_url`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).await?;
        Ok(Self {
            base_path,
            base_url,
        })
    }

    /// Resolve a bucket/key pair to a filesystem path, rejecting keys that
    /// could escape the storage root.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        for part in [bucket, key] {
            if part.contains("..") || part.starts_with('/') || part.contains('\\') {
                return Err(StorageError::InvalidKey(format!("{bucket}/{key}")));
            }
        }
        Ok(self.base_path.join(bucket).join(key))
    }

    async fn ensure_parent_dir(path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.object_path(bucket, key)?;
        Self::ensure_parent_dir(&path).await?;
        fs::write(&path, data).await?;
        Ok(self.public_url(bucket, key))
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{bucket}/{key}", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_files_and_returns_public_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080/files/".to_string())
            .await
            .unwrap();

        let url = storage
            .upload("logos", "123_logo.png", b"bytes".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/files/logos/123_logo.png");
        let written = std::fs::read(dir.path().join("logos/123_logo.png")).unwrap();
        assert_eq!(written, b"bytes");
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8080".to_string())
            .await
            .unwrap();

        let err = storage
            .upload("logos", "../escape.png", b"x".to_vec(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
