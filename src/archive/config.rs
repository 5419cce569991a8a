// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for image archiving

use std::env;
use std::time::Duration;

/// Maximum images archived per request
pub const MAX_IMAGES: usize = 10;

/// Configuration for downloading and persisting images
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Timeout per image download in seconds (default: 10)
    pub timeout_per_image_secs: u64,
    /// Maximum bytes per image (default: 10 MiB)
    pub max_image_bytes: usize,
    /// Parallel downloads (default: 4)
    pub concurrency: usize,
    /// Maximum images archived per call (default and cap: 10)
    pub max_images: usize,
    /// Allow image hosts in loopback/private address space (default: false)
    pub allow_private_hosts: bool,
    /// User-Agent sent with image downloads
    pub user_agent: String,
}

impl ArchiveConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_per_image_secs: env::var("IMAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_per_image_secs),
            max_image_bytes: env::var("IMAGE_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            concurrency: env::var("IMAGE_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.concurrency),
            max_images: defaults.max_images,
            allow_private_hosts: env::var("FETCH_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            user_agent: defaults.user_agent,
        }
    }

    /// Budget for one image: download and body read together
    pub fn per_image_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_per_image_secs)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_per_image_secs == 0 {
            return Err("timeout_per_image_secs must be at least 1".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be at least 1".to_string());
        }
        if self.max_image_bytes == 0 {
            return Err("max_image_bytes must be greater than 0".to_string());
        }
        if self.max_images > MAX_IMAGES {
            return Err(format!("max_images cannot exceed {}", MAX_IMAGES));
        }
        Ok(())
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            timeout_per_image_secs: 10,
            max_image_bytes: 10 * 1024 * 1024,
            concurrency: 4,
            max_images: MAX_IMAGES,
            allow_private_hosts: false,
            user_agent: crate::content::config::BROWSER_USER_AGENT.to_string(),
        }
    }
}
