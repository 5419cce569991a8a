// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Harvest API response types

use serde::{Deserialize, Serialize};

use crate::archive::StoredImage;
use crate::search::SearchResultItem;

/// What scrape mode learned about one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub title: String,
    pub description: String,
    pub matches: Vec<String>,
    pub images: Vec<StoredImage>,
}

/// Response body for POST /v1/harvest
///
/// Build with [`HarvestResponse::search`] or [`HarvestResponse::scrape`];
/// the counts are derived from the sequences they describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum HarvestResponse {
    Search {
        keyword: String,
        results: Vec<SearchResultItem>,
        result_count: usize,
        images: Vec<StoredImage>,
        image_count: usize,
    },
    Scrape {
        keyword: String,
        url: String,
        title: String,
        description: String,
        matches: Vec<String>,
        match_count: usize,
        images: Vec<StoredImage>,
        image_count: usize,
    },
}

impl HarvestResponse {
    /// Create a search-mode response
    pub fn search(
        keyword: impl Into<String>,
        results: Vec<SearchResultItem>,
        images: Vec<StoredImage>,
    ) -> Self {
        HarvestResponse::Search {
            keyword: keyword.into(),
            result_count: results.len(),
            results,
            image_count: images.len(),
            images,
        }
    }

    /// Create a scrape-mode response
    pub fn scrape(keyword: impl Into<String>, url: impl Into<String>, outcome: ScrapeOutcome) -> Self {
        HarvestResponse::Scrape {
            keyword: keyword.into(),
            url: url.into(),
            title: outcome.title,
            description: outcome.description,
            match_count: outcome.matches.len(),
            matches: outcome.matches,
            image_count: outcome.images.len(),
            images: outcome.images,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            HarvestResponse::Search { .. } => "search",
            HarvestResponse::Scrape { .. } => "scrape",
        }
    }

    pub fn images(&self) -> &[StoredImage] {
        match self {
            HarvestResponse::Search { images, .. } | HarvestResponse::Scrape { images, .. } => {
                images
            }
        }
    }
}
