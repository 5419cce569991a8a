// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Harvest API request types

use serde_json::{Map, Value};
use url::Url;

use crate::api::errors::ApiError;

/// Maximum keyword length in characters
pub const MAX_KEYWORD_CHARS: usize = 500;

/// A validated harvest request; the variant is the pipeline that serves it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestRequest {
    /// No target page: query the search provider
    Search { keyword: String },
    /// Fetch and scan one page
    Scrape { keyword: String, url: String },
}

impl HarvestRequest {
    /// Parse and validate a raw JSON body
    ///
    /// # Body
    /// - `keyword`: non-empty string (trimmed, max 500 chars)
    /// - `url`: optional absolute http(s) URL; blank or null selects search mode
    pub fn parse(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;

        let Value::Object(fields) = value else {
            return Err(ApiError::InvalidRequest(
                "body must be a JSON object".to_string(),
            ));
        };

        let keyword = parse_keyword(&fields)?;

        match parse_url(&fields)? {
            Some(url) => Ok(HarvestRequest::Scrape { keyword, url }),
            None => Ok(HarvestRequest::Search { keyword }),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            HarvestRequest::Search { keyword } | HarvestRequest::Scrape { keyword, .. } => keyword,
        }
    }

    /// Wire name of the mode
    pub fn mode(&self) -> &'static str {
        match self {
            HarvestRequest::Search { .. } => "search",
            HarvestRequest::Scrape { .. } => "scrape",
        }
    }
}

fn parse_keyword(fields: &Map<String, Value>) -> Result<String, ApiError> {
    let keyword = match fields.get("keyword") {
        Some(Value::String(s)) => s.trim(),
        Some(Value::Null) | None => return Err(ApiError::validation("keyword", "keyword is required")),
        Some(_) => return Err(ApiError::validation("keyword", "keyword must be a string")),
    };

    if keyword.is_empty() {
        return Err(ApiError::validation("keyword", "keyword cannot be empty"));
    }
    if keyword.chars().count() > MAX_KEYWORD_CHARS {
        return Err(ApiError::validation(
            "keyword",
            format!("keyword too long (max {} characters)", MAX_KEYWORD_CHARS),
        ));
    }

    Ok(keyword.to_string())
}

fn parse_url(fields: &Map<String, Value>) -> Result<Option<String>, ApiError> {
    let raw = match fields.get("url") {
        Some(Value::String(s)) => s.trim(),
        Some(Value::Null) | None => return Ok(None),
        Some(_) => return Err(ApiError::validation("url", "url must be a string")),
    };

    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw)
        .map_err(|_| ApiError::validation("url", "url must be an absolute http(s) URL"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ApiError::validation(
            "url",
            "url must be an absolute http(s) URL",
        ));
    }

    Ok(Some(raw.to_string()))
}
