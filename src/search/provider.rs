// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchResultItem};
use crate::archive::ImageCandidate;

/// Trait for implementing search providers
///
/// Web and image search are separate calls so that each can fail on its own.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `count` - Maximum number of results to return
    async fn web_search(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResultItem>, SearchError>;

    /// Perform an image search, returning candidates in provider order
    async fn image_search(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<ImageCandidate>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;

    /// Check if the provider is available (has API key, etc.)
    fn is_available(&self) -> bool;
}
