// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the image blob store

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::blob_store::{BlobStore, StorageError};
use super::http_store::HttpBlobStore;
use super::local::LocalBlobStore;
use super::memory::MemoryBlobStore;
use crate::utils::SecretString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3-compatible object gateway over HTTP
    Http,
    /// Directory on the local filesystem
    Local,
    /// In-process map, lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "s3" => Ok(Self::Http),
            "local" | "fs" => Ok(Self::Local),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Bucket identifier (IMAGE_BUCKET)
    pub bucket: String,
    /// Bucket region (AWS_REGION)
    pub region: String,
    /// Object gateway endpoint (STORAGE_ENDPOINT); required by the http backend
    pub endpoint: Option<String>,
    pub api_token: Option<SecretString>,
    /// Root directory for the local backend
    pub local_root: PathBuf,
    /// Overrides the public URL prefix of stored objects
    pub public_base_url: Option<String>,
    /// Timeout per blob store call in milliseconds
    pub timeout_ms: u64,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails only when `STORAGE_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("STORAGE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StorageBackend::Http,
        };

        Ok(Self {
            backend,
            bucket: env::var("IMAGE_BUCKET").unwrap_or_default(),
            region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-1".to_string()),
            endpoint: env::var("STORAGE_ENDPOINT").ok().filter(|v| !v.is_empty()),
            api_token: env::var("STORAGE_API_TOKEN").ok().map(SecretString::from),
            local_root: env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            timeout_ms: env::var("STORAGE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("IMAGE_BUCKET must be set".to_string());
        }
        if self.region.trim().is_empty() {
            return Err("AWS_REGION must be set".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("Storage timeout must be greater than 0".to_string());
        }
        if self.backend == StorageBackend::Http {
            // Unsigned writes to a bare bucket URL are refused by S3, so the
            // gateway that accepts them has to be named explicitly.
            let endpoint = self
                .endpoint
                .as_deref()
                .ok_or("STORAGE_ENDPOINT must be set for the http storage backend")?;
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| format!("Invalid STORAGE_ENDPOINT: {}", e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err("STORAGE_ENDPOINT must be an http(s) URL".to_string());
            }
        }
        Ok(())
    }

    /// True when the http backend would send unauthenticated requests
    /// straight to an AWS S3 host.
    pub fn is_unsigned_s3_endpoint(&self) -> bool {
        let on_s3 = self
            .endpoint
            .as_deref()
            .and_then(|e| url::Url::parse(e).ok())
            .and_then(|u| u.host_str().map(|h| h.ends_with(".amazonaws.com")))
            .unwrap_or(false);
        let has_token = self.api_token.as_ref().is_some_and(|t| !t.is_empty());
        self.backend == StorageBackend::Http && on_s3 && !has_token
    }

    /// Virtual-hosted S3 URL of the bucket
    pub fn bucket_url(&self) -> String {
        format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region)
    }

    /// Prefix that stored keys are appended to when building public URLs
    pub fn public_base_url(&self) -> String {
        self.public_base_url
            .clone()
            .unwrap_or_else(|| self.bucket_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            bucket: "harvest-images".to_string(),
            region: "ap-northeast-1".to_string(),
            endpoint: None,
            api_token: None,
            local_root: PathBuf::from("./data"),
            public_base_url: None,
            timeout_ms: 5000,
        }
    }
}

/// Build the blob store selected by `config.backend`.
pub fn create_blob_store(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
    config.validate().map_err(StorageError::Config)?;

    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::Http => {
            let endpoint = config.endpoint.clone().ok_or_else(|| {
                StorageError::Config("STORAGE_ENDPOINT must be set for the http storage backend".to_string())
            })?;
            if config.is_unsigned_s3_endpoint() {
                warn!(
                    "STORAGE_ENDPOINT {} is an S3 host and no STORAGE_API_TOKEN is set; \
                     unsigned HEAD/PUT requests will be refused unless the bucket allows them",
                    endpoint
                );
            }
            Arc::new(HttpBlobStore::new(
                endpoint,
                config.public_base_url(),
                config.api_token.clone(),
                config.timeout(),
            )?)
        }
        StorageBackend::Local => Arc::new(LocalBlobStore::new(
            config.local_root.clone(),
            config.public_base_url(),
        )),
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new(config.public_base_url())),
    };

    info!("Blob store backend: {}", store.name());
    Ok(store)
}
