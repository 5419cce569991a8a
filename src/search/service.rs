// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search service orchestration
//!
//! Runs the web and image searches for a keyword concurrently, each under its
//! own timeout. Web search failure is fatal; image search failure is not.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::brave::BraveSearchProvider;
use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchOutcome, MAX_RESULTS};

/// Search service wrapping a single provider
pub struct SearchService {
    provider: Arc<dyn SearchProvider>,
    config: SearchConfig,
}

impl SearchService {
    /// Create a new search service backed by Brave Search
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let provider = BraveSearchProvider::new(&config)?;
        debug!("Brave Search provider enabled");
        Ok(Self::with_provider(Arc::new(provider), config))
    }

    /// Create a search service over an arbitrary provider
    pub fn with_provider(provider: Arc<dyn SearchProvider>, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Search the web and images for `keyword`.
    ///
    /// # Returns
    /// Up to 10 web results and up to 10 image candidates. Errors only when
    /// the web search fails.
    pub async fn search(&self, keyword: &str) -> Result<SearchOutcome, SearchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SearchError::InvalidQuery {
                reason: "keyword is empty".to_string(),
            });
        }
        if !self.provider.is_available() {
            return Err(SearchError::NoApiKey {
                provider: self.provider.name().to_string(),
            });
        }

        let count = self.config.default_num_results.min(MAX_RESULTS);
        let timeout_ms = self.config.request_timeout_ms;
        let timeout = Duration::from_millis(timeout_ms);
        let start = Instant::now();

        let (web, images) = tokio::join!(
            tokio::time::timeout(timeout, self.provider.web_search(keyword, count)),
            tokio::time::timeout(timeout, self.provider.image_search(keyword, count)),
        );

        let mut results = web.map_err(|_| SearchError::Timeout { timeout_ms })??;
        results.truncate(MAX_RESULTS);

        let mut image_candidates = match images {
            Ok(Ok(candidates)) => candidates,
            Ok(Err(e)) => {
                warn!("Image search via {} failed: {}", self.provider.name(), e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "Image search via {} timed out after {}ms",
                    self.provider.name(),
                    timeout_ms
                );
                Vec::new()
            }
        };
        image_candidates.truncate(MAX_RESULTS);

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Search complete: {} results, {} image candidates from {} in {}ms",
            results.len(),
            image_candidates.len(),
            self.provider.name(),
            elapsed_ms
        );

        Ok(SearchOutcome {
            results,
            image_candidates,
            provider: self.provider.name().to_string(),
            search_time_ms: elapsed_ms,
        })
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }
}
