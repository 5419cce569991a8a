// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request routing for the harvest endpoint
//!
//! ```text
//! (method, body) → HarvestRequest::parse
//!     Search { keyword }      → SearchService  → ImageArchiver → HarvestResponse::search
//!     Scrape { keyword, url } → PageFetcher → extract_page → ImageArchiver → HarvestResponse::scrape
//! ```
//!
//! Every outcome, including failures, becomes an [`ApiEnvelope`] carrying the
//! CORS headers and a JSON body.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::HarvestRequest;
use super::response::{HarvestResponse, ScrapeOutcome};
use crate::api::errors::ApiError;
use crate::archive::ImageArchiver;
use crate::content::{extract_page, BlockLengthBounds, PageFetcher};
use crate::search::SearchService;

/// Headers attached to every response
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key",
    ),
    ("Access-Control-Allow-Methods", "POST,OPTIONS"),
    ("Content-Type", "application/json; charset=utf-8"),
];

/// Status, headers and serialized JSON body of one response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEnvelope {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl ApiEnvelope {
    fn new(status: u16, body: String) -> Self {
        Self {
            status,
            headers: CORS_HEADERS.to_vec(),
            body,
        }
    }

    /// 200 with a serialized body
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::new(200, body),
            Err(e) => Self::error(&ApiError::InternalError(format!(
                "failed to serialize response: {}",
                e
            ))),
        }
    }

    pub fn error(error: &ApiError) -> Self {
        let body = serde_json::to_string(&error.to_response()).unwrap_or_else(|_| {
            r#"{"error":"Internal error","error_type":"internal_error"}"#.to_string()
        });
        Self::new(error.status_code(), body)
    }

    /// CORS preflight answer
    pub fn preflight() -> Self {
        Self::new(200, String::new())
    }

    /// Parse the body back into JSON (tests and logging)
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

impl IntoResponse for ApiEnvelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}

/// Validates requests, runs the selected pipeline and shapes the envelope
pub struct RequestRouter {
    search: Arc<SearchService>,
    fetcher: Arc<PageFetcher>,
    archiver: Arc<ImageArchiver>,
    block_bounds: BlockLengthBounds,
}

impl RequestRouter {
    pub fn new(
        search: Arc<SearchService>,
        fetcher: Arc<PageFetcher>,
        archiver: Arc<ImageArchiver>,
        block_bounds: BlockLengthBounds,
    ) -> Self {
        Self {
            search,
            fetcher,
            archiver,
            block_bounds,
        }
    }

    /// Handle one raw request. Never fails; errors become error envelopes.
    pub async fn handle(&self, method: &str, body: &[u8]) -> ApiEnvelope {
        match method.to_ascii_uppercase().as_str() {
            "OPTIONS" => ApiEnvelope::preflight(),
            "POST" => match self.dispatch(body).await {
                Ok(response) => ApiEnvelope::ok(&response),
                Err(e) => {
                    warn!("Harvest request failed ({}): {}", e.status_code(), e);
                    ApiEnvelope::error(&e)
                }
            },
            other => ApiEnvelope::error(&ApiError::MethodNotAllowed(other.to_string())),
        }
    }

    /// Validate the body and run the pipeline it selects
    pub async fn dispatch(&self, body: &[u8]) -> Result<HarvestResponse, ApiError> {
        let request = HarvestRequest::parse(body)?;
        debug!("Harvest request: mode={} keyword={:?}", request.mode(), request.keyword());

        let start = Instant::now();
        let response = match request {
            HarvestRequest::Search { keyword } => self.run_search(keyword).await?,
            HarvestRequest::Scrape { keyword, url } => self.run_scrape(keyword, url).await?,
        };

        info!(
            "Harvest complete: mode={} images={} in {}ms",
            response.mode(),
            response.images().len(),
            start.elapsed().as_millis()
        );
        Ok(response)
    }

    async fn run_search(&self, keyword: String) -> Result<HarvestResponse, ApiError> {
        let outcome = self.search.search(&keyword).await?;
        let images = self.archiver.archive(outcome.image_candidates).await;

        Ok(HarvestResponse::search(keyword, outcome.results, images))
    }

    async fn run_scrape(&self, keyword: String, url: String) -> Result<HarvestResponse, ApiError> {
        let page = self.fetcher.fetch(&url).await?;
        let extracted = extract_page(&page.html, &page.final_url, &keyword, &self.block_bounds);
        debug!(
            "Extracted {} matches and {} image candidates from {}",
            extracted.matches.len(),
            extracted.image_candidates.len(),
            page.final_url
        );

        let images = self.archiver.archive(extracted.image_candidates).await;

        Ok(HarvestResponse::scrape(
            keyword,
            url,
            ScrapeOutcome {
                title: extracted.title,
                description: extracted.description,
                matches: extracted.matches,
                images,
            },
        ))
    }
}
