// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Write rejected with HTTP {status}")]
    Rejected { status: u16 },
    #[error("Timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Key/value blob store the image archiver writes into.
///
/// Objects are write-once: callers go through [`BlobStore::put_if_absent`],
/// and keys are derived from content so two writers of the same key always
/// carry identical bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str)
        -> Result<(), StorageError>;

    /// Public, unauthenticated URL for a stored key
    fn public_url(&self, key: &str) -> String;

    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// Write `data` under `key` unless an object already exists there, and
    /// return the object's public URL either way.
    async fn put_if_absent(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_key(key)?;

        if self.exists(key).await? {
            tracing::debug!("Blob {} already stored in {}, skipping write", key, self.name());
        } else {
            self.put(key, data, content_type).await?;
        }

        Ok(self.public_url(key))
    }
}

/// Reject keys that are empty, absolute, or try to climb out of the namespace.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Empty key".to_string()));
    }

    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(
            "Key cannot start with /".to_string(),
        ));
    }

    if key.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        return Err(StorageError::InvalidKey(format!(
            "Key has an empty or parent segment: {}",
            key
        )));
    }

    Ok(())
}
