use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{public_url, validate_key, ObjectStore, StorageError, StoredBlob, StoredObject};

/// Content type served for objects whose type was never recorded.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Stores each bucket as a directory under `root`. Content types live in a
/// `.meta` sidecar directory, which no valid key can collide with.
#[derive(Debug, Clone)]
pub struct DirectoryObjectStore {
    bucket_dir: PathBuf,
    meta_dir: PathBuf,
    bucket: String,
    public_base_url: String,
}

impl DirectoryObjectStore {
    /// Creates the bucket directory if it does not exist yet.
    pub async fn open(
        root: impl AsRef<Path>,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let bucket = bucket.into();
        validate_key(&bucket)?;
        let bucket_dir = root.as_ref().join(&bucket);
        let meta_dir = bucket_dir.join(".meta");
        fs::create_dir_all(&meta_dir).await?;

        Ok(Self {
            bucket_dir,
            meta_dir,
            bucket,
            public_base_url: public_base_url.into(),
        })
    }
}

#[async_trait]
impl ObjectStore for DirectoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        validate_key(key)?;
        if bytes.is_empty() {
            return Err(StorageError::EmptyUpload);
        }

        fs::write(self.bucket_dir.join(key), bytes).await?;
        fs::write(self.meta_dir.join(key), content_type.as_bytes()).await?;
        debug!(bucket = %self.bucket, key, size = bytes.len(), content_type, "object stored");

        Ok(StoredObject {
            key: key.to_string(),
            url: public_url(&self.public_base_url, &self.bucket, key),
            content_type: content_type.to_string(),
            size: bytes.len(),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<StoredBlob>, StorageError> {
        validate_key(key)?;
        let bytes = match fs::read(self.bucket_dir.join(key)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let content_type = match fs::read_to_string(self.meta_dir.join(key)).await {
            Ok(recorded) if !recorded.trim().is_empty() => recorded.trim().to_string(),
            Ok(_) => FALLBACK_CONTENT_TYPE.to_string(),
            Err(err) if err.kind() == ErrorKind::NotFound => FALLBACK_CONTENT_TYPE.to_string(),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(StoredBlob {
            bytes,
            content_type,
        }))
    }
}
