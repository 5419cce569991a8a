// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Download image candidates and persist them under content-derived keys

use futures::stream::{self, StreamExt};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::config::ArchiveConfig;
use super::media::{extension_for, resolve_media_type};
use super::types::{ImageCandidate, StoredImage};
use crate::storage::{BlobStore, StorageError};
use crate::utils::net::{self, BodyError};

/// Why a single candidate was dropped
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Unsafe image URL blocked: {0}")]
    UnsafeUrl(String),

    #[error("Image download timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Image download returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Not an image: {content_type}")]
    NotAnImage { content_type: String },

    #[error("Image exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Image download failed: {0}")]
    Download(String),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Storage key for image bytes: `images/<sha256 hex>.<ext>`.
///
/// Identical bytes always produce the same key, whichever URL they came from.
pub fn content_key(bytes: &[u8], media_type: &str) -> String {
    let digest = Sha256::digest(bytes);
    format!("images/{}.{}", hex::encode(digest), extension_for(media_type))
}

/// Downloads images and writes them to a blob store.
pub struct ImageArchiver {
    client: Client,
    store: Arc<dyn BlobStore>,
    config: ArchiveConfig,
}

impl ImageArchiver {
    pub fn new(config: ArchiveConfig, store: Arc<dyn BlobStore>) -> Result<Self, ArchiveError> {
        let client = Client::builder()
            .timeout(config.per_image_timeout())
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ArchiveError::Download(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            store,
            config,
        })
    }

    /// Archive candidates, returning the successes in candidate order.
    ///
    /// Downloads run with at most `config.concurrency` in flight. Failures are
    /// logged and dropped; this never fails as a whole.
    pub async fn archive(&self, candidates: Vec<ImageCandidate>) -> Vec<StoredImage> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let total = candidates.len().min(self.config.max_images);
        let outcomes: Vec<Option<StoredImage>> = stream::iter(
            candidates.into_iter().take(self.config.max_images),
        )
        .map(|candidate| async move {
            match self.archive_one(&candidate).await {
                Ok(stored) => Some(stored),
                Err(e) => {
                    warn!("Dropping image {}: {}", candidate.original_url, e);
                    None
                }
            }
        })
        .buffered(self.config.concurrency.max(1))
        .collect()
        .await;

        let stored: Vec<StoredImage> = outcomes.into_iter().flatten().collect();
        info!(
            "Archived {}/{} images to {}",
            stored.len(),
            total,
            self.store.name()
        );
        stored
    }

    /// Download one candidate and persist it.
    pub async fn archive_one(
        &self,
        candidate: &ImageCandidate,
    ) -> Result<StoredImage, ArchiveError> {
        let url = Url::parse(candidate.original_url.trim())
            .map_err(|_| ArchiveError::InvalidUrl(candidate.original_url.clone()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ArchiveError::InvalidUrl(candidate.original_url.clone()));
        }
        if !self.config.allow_private_hosts && !net::is_safe_url(&url) {
            return Err(ArchiveError::UnsafeUrl(candidate.original_url.clone()));
        }

        let (bytes, header_type) =
            tokio::time::timeout(self.config.per_image_timeout(), self.download(url))
                .await
                .map_err(|_| self.timeout_error())??;

        let media_type = resolve_media_type(&bytes, header_type.as_deref()).ok_or_else(|| {
            ArchiveError::NotAnImage {
                content_type: header_type.clone().unwrap_or_else(|| "unknown".to_string()),
            }
        })?;

        let key = content_key(&bytes, &media_type);
        debug!("Storing {} as {}", candidate.original_url, key);
        let stored_url = self.store.put_if_absent(&key, bytes, &media_type).await?;

        Ok(StoredImage {
            original_url: candidate.original_url.clone(),
            stored_url,
            alt: candidate.alt.clone(),
        })
    }

    async fn download(&self, url: Url) -> Result<(Vec<u8>, Option<String>), ArchiveError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "image/avif,image/webp,image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        // Redirects may have moved the download to a host the first check never saw
        if !self.config.allow_private_hosts && !net::is_safe_url(response.url()) {
            return Err(ArchiveError::UnsafeUrl(response.url().to_string()));
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let header_type = net::media_type(&response);
        if let Some(ref content_type) = header_type {
            if !may_be_image(content_type) {
                return Err(ArchiveError::NotAnImage {
                    content_type: content_type.clone(),
                });
            }
        }

        let bytes = net::read_body_limited(response, self.config.max_image_bytes)
            .await
            .map_err(|e| match e {
                BodyError::TooLarge { limit } => ArchiveError::TooLarge { limit },
                BodyError::Transport(e) => self.map_request_error(e),
            })?;

        Ok((bytes, header_type))
    }

    fn map_request_error(&self, e: reqwest::Error) -> ArchiveError {
        if e.is_timeout() {
            self.timeout_error()
        } else {
            ArchiveError::Download(e.without_url().to_string())
        }
    }

    fn timeout_error(&self) -> ArchiveError {
        ArchiveError::Timeout {
            timeout_ms: self.config.per_image_timeout().as_millis() as u64,
        }
    }

    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }
}

/// Header values worth downloading: images, and the generic binary types
/// some CDNs send for images.
fn may_be_image(content_type: &str) -> bool {
    content_type.starts_with("image/")
        || content_type == "application/octet-stream"
        || content_type == "binary/octet-stream"
}
