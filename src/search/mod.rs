// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Keyword search module
//!
//! Search mode of a harvest request:
//! - Web search for organic results (fatal on failure)
//! - Image search for image candidates (empty on failure)
//!
//! Both calls run concurrently against Brave Search, each with its own timeout.

pub mod brave;
pub mod config;
pub mod provider;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use brave::BraveSearchProvider;
pub use config::SearchConfig;
pub use provider::SearchProvider;
pub use service::SearchService;
pub use types::{SearchError, SearchOutcome, SearchResultItem, MAX_RESULTS};
