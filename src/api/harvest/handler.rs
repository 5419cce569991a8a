// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Harvest API endpoint handlers

use axum::{body::Bytes, extract::State, http::Method, Json};
use serde_json::{json, Value};
use tracing::warn;

use super::router::ApiEnvelope;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::version;

/// ANY /v1/harvest (and /) - Harvest text and images for a keyword
///
/// # Request
/// - `keyword`: Keyword to search for or match (required, max 500 chars)
/// - `url`: Page to scrape (optional; absent or blank selects search mode)
///
/// # Response
/// - Search mode: `results`, `result_count`, `images`, `image_count`
/// - Scrape mode: `title`, `description`, `matches`, `match_count`, `images`, `image_count`
///
/// # Errors
/// - 400 Bad Request: Invalid body, keyword or url
/// - 405 Method Not Allowed: Anything but POST/OPTIONS
/// - 429 Too Many Requests: Search provider rate limit
/// - 502 Bad Gateway: Search provider or target page failed
/// - 504 Gateway Timeout: Upstream timed out or the request budget ran out
pub async fn harvest_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> ApiEnvelope {
    match tokio::time::timeout(
        state.request_budget,
        state.router.handle(method.as_str(), &body),
    )
    .await
    {
        Ok(envelope) => envelope,
        Err(_) => {
            warn!(
                "Harvest request exceeded budget of {}s",
                state.request_budget.as_secs()
            );
            ApiEnvelope::error(&ApiError::Timeout)
        }
    }
}

/// GET /health - Liveness check
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": version::VERSION_NUMBER,
    }))
}
