// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration
//!
//! Read once from the environment at startup, validated once, then handed to
//! each component. Nothing reads environment variables per request.

use std::env;
use std::time::Duration;

use crate::archive::ArchiveConfig;
use crate::content::{BlockLengthBounds, ContentFetchConfig};
use crate::search::SearchConfig;
use crate::storage::StorageConfig;

/// HTTP listener and request budget
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whole-request budget in seconds (default: 29)
    pub request_budget_secs: u64,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("API_HOST").unwrap_or(defaults.host),
            port: env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            request_budget_secs: env::var("REQUEST_BUDGET_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_budget_secs),
        }
    }

    pub fn request_budget(&self) -> Duration {
        Duration::from_secs(self.request_budget_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_budget_secs: 29,
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub fetch: ContentFetchConfig,
    pub archive: ArchiveConfig,
    pub storage: StorageConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            search: SearchConfig::from_env(),
            fetch: ContentFetchConfig::from_env(),
            archive: ArchiveConfig::from_env(),
            storage: StorageConfig::from_env()?,
            server: ServerConfig::from_env(),
        })
    }

    /// Validate every section, then check each outbound timeout fits the budget
    pub fn validate(&self) -> Result<(), String> {
        self.search.validate()?;
        self.fetch.validate()?;
        self.archive.validate()?;
        self.storage.validate()?;

        if self.server.request_budget_secs == 0 {
            return Err("REQUEST_BUDGET_SECS must be greater than 0".to_string());
        }

        let budget = self.server.request_budget();
        let per_call = [
            ("SEARCH_TIMEOUT_MS", Duration::from_millis(self.search.request_timeout_ms)),
            ("FETCH_TIMEOUT_SECS", Duration::from_secs(self.fetch.timeout_secs)),
            ("IMAGE_TIMEOUT_SECS", self.archive.per_image_timeout()),
            ("STORAGE_TIMEOUT_MS", self.storage.timeout()),
        ];
        for (name, timeout) in per_call {
            if timeout >= budget {
                return Err(format!(
                    "{} ({}ms) must be smaller than the request budget ({}ms)",
                    name,
                    timeout.as_millis(),
                    budget.as_millis()
                ));
            }
        }

        Ok(())
    }

    /// Block length filter applied by the extractor
    pub fn block_length_bounds(&self) -> BlockLengthBounds {
        BlockLengthBounds {
            min_chars: self.fetch.min_block_chars,
            max_chars: self.fetch.max_block_chars,
        }
    }
}
