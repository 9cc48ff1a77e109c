//! Uploaded files (menu photos, receipts) kept in a bucket and served back by URL.

mod directory;

pub use directory::DirectoryObjectStore;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub key: String,
    pub url: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object key '{0}' is not allowed")]
    InvalidKey(String),
    #[error("upload is empty")]
    EmptyUpload,
    #[error("storage backend unavailable: {0}")]
    Backend(#[from] std::io::Error),
}

/// Bytes read back from a bucket together with the content type they were stored with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Bucket abstraction so routes can be exercised without a real backend.
#[async_trait]
pub trait ObjectStore: Debug + Send + Sync {
    fn bucket(&self) -> &str;
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, StorageError>;
    async fn get(&self, key: &str) -> Result<Option<StoredBlob>, StorageError>;
}

/// Builds `{timestamp_ms}-{name}` with path separators and control
/// characters replaced so the key is always a single path segment.
pub fn object_key(original_name: &str, timestamp_ms: i64) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    let name = if cleaned.is_empty() { "upload" } else { cleaned };

    format!("{timestamp_ms}-{name}")
}

/// Keys must be a single segment produced by [`object_key`].
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && !key.contains(['/', '\\'])
        && !key.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

pub fn public_url(public_base_url: &str, bucket: &str, key: &str) -> String {
    format!("{}/{bucket}/{key}", public_base_url.trim_end_matches('/'))
}
