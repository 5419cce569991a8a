// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for keyword search

use std::env;
use url::Url;

use crate::utils::SecretString;

pub const DEFAULT_BRAVE_BASE_URL: &str = "https://api.search.brave.com";

/// Configuration for the search provider
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Brave Search API key
    pub brave_api_key: Option<SecretString>,
    /// Provider base URL (overridable for gateways and test fixtures)
    pub base_url: String,
    /// Optional `country` parameter for web search
    pub country: Option<String>,
    /// Optional `search_lang` parameter for web search
    pub search_lang: Option<String>,
    /// Timeout per search call in milliseconds
    pub request_timeout_ms: u64,
    /// Number of results requested from the provider
    pub default_num_results: usize,
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            brave_api_key: env::var("BRAVE_API_KEY").ok().map(SecretString::from),
            base_url: env::var("BRAVE_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BRAVE_BASE_URL.to_string()),
            country: env::var("SEARCH_COUNTRY").ok().filter(|v| !v.is_empty()),
            search_lang: env::var("SEARCH_LANG").ok().filter(|v| !v.is_empty()),
            request_timeout_ms: env::var("SEARCH_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            default_num_results: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.has_api_key() {
            return Err("BRAVE_API_KEY must be set".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("Search timeout must be greater than 0".to_string());
        }
        Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid BRAVE_API_BASE_URL {}: {}", self.base_url, e))?;
        Ok(())
    }

    /// Check if the provider credential is configured
    pub fn has_api_key(&self) -> bool {
        self.brave_api_key
            .as_ref()
            .is_some_and(|key| !key.is_empty())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            brave_api_key: None,
            base_url: DEFAULT_BRAVE_BASE_URL.to_string(),
            country: None,
            search_lang: None,
            request_timeout_ms: 10000,
            default_num_results: 10,
        }
    }
}
