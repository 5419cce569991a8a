// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::blob_store::{validate_key, BlobStore, StorageError};

#[derive(Debug, Clone)]
pub struct MemoryObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-process blob store for tests and local development
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    public_base_url: String,
    objects: Arc<Mutex<HashMap<String, MemoryObject>>>,
    writes: Arc<AtomicUsize>,
    injected_error: Arc<Mutex<Option<StorageError>>>,
}

impl MemoryBlobStore {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(AtomicUsize::new(0)),
            injected_error: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<MemoryObject> {
        self.objects.lock().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of `put` calls that actually wrote bytes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the next `put` fail with `error`
    pub async fn inject_error(&self, error: StorageError) {
        *self.injected_error.lock().await = Some(error);
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("memory://blobs")
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        Ok(self.objects.lock().await.contains_key(key))
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(key)?;

        if let Some(error) = self.injected_error.lock().await.take() {
            return Err(error);
        }

        self.objects.lock().await.insert(
            key.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
