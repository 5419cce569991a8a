// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for keyword search

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::archive::ImageCandidate;

/// Maximum web results and image candidates kept from one search
pub const MAX_RESULTS: usize = 10;

/// A single organic web result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Title of the search result
    pub title: String,
    /// URL of the search result
    pub url: String,
    /// Snippet/description of the search result
    pub snippet: String,
    /// Hostname shown for the result
    pub display_url: String,
}

/// Everything one keyword search produced
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Web results in provider relevance order
    pub results: Vec<SearchResultItem>,
    /// Image candidates in provider order (empty if image search failed)
    pub image_candidates: Vec<ImageCandidate>,
    /// Provider that served the search
    pub provider: String,
    /// Wall time of both searches in milliseconds
    pub search_time_ms: u64,
}

/// Errors that can occur during search operations
///
/// Provider response bodies are never carried here; only status codes.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Rate limited by the search provider
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// Non-success status from the search provider
    #[error("Search API error: HTTP {status}")]
    ApiError {
        /// HTTP status code
        status: u16,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// Provider rejected our credentials
    #[error("Search provider {provider} rejected the API key")]
    Unauthorized {
        /// Name of the provider
        provider: String,
    },

    /// No API key configured for the provider
    #[error("No API key configured for {provider}")]
    NoApiKey {
        /// Name of the provider missing API key
        provider: String,
    },

    /// Invalid search query
    #[error("Invalid query: {reason}")]
    InvalidQuery {
        /// Reason the query is invalid
        reason: String,
    },

    /// Provider answered 2xx with a body we could not decode
    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    /// Connection-level failure reaching the provider
    #[error("Search request failed: {0}")]
    Network(String),
}

impl SearchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
