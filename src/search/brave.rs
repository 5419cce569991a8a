// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Brave Search API provider
//!
//! Implements web and image search using the Brave Search API.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::config::SearchConfig;
use super::provider::SearchProvider;
use super::types::{SearchError, SearchResultItem};
use crate::archive::ImageCandidate;
use crate::utils::SecretString;

const WEB_SEARCH_PATH: &str = "/res/v1/web/search";
const IMAGE_SEARCH_PATH: &str = "/res/v1/images/search";

/// Brave Search API provider
pub struct BraveSearchProvider {
    api_key: SecretString,
    client: Client,
    base_url: String,
    country: Option<String>,
    search_lang: Option<String>,
    timeout_ms: u64,
}

impl BraveSearchProvider {
    /// Create a new Brave Search provider
    ///
    /// # Arguments
    /// * `config` - Search configuration; the API key must be present
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let api_key = config
            .brave_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| SearchError::NoApiKey {
                provider: "brave".to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            search_lang: config.search_lang.clone(),
            timeout_ms: config.request_timeout_ms,
        })
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, SearchError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("X-Subscription-Token", self.api_key.expose())
            .header("Accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    SearchError::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();

        if status == 429 {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(60);
            return Err(SearchError::RateLimited { retry_after_secs });
        }

        if status == 401 || status == 403 {
            return Err(SearchError::Unauthorized {
                provider: "brave".to_string(),
            });
        }

        if !status.is_success() {
            debug!("Brave {} returned HTTP {}", path, status);
            return Err(SearchError::ApiError {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl SearchProvider for BraveSearchProvider {
    async fn web_search(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResultItem>, SearchError> {
        let mut params = vec![("q", query.to_string()), ("count", count.min(20).to_string())];
        if let Some(ref country) = self.country {
            params.push(("country", country.clone()));
        }
        if let Some(ref lang) = self.search_lang {
            params.push(("search_lang", lang.clone()));
        }

        let data: BraveWebResponse = self
            .get(WEB_SEARCH_PATH, &params)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.without_url().to_string()))?;

        Ok(data
            .web
            .map(|web| web.results)
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                let display_url = r
                    .meta_url
                    .and_then(|m| m.hostname)
                    .filter(|h| !h.is_empty())
                    .unwrap_or_else(|| host_of(&r.url));
                SearchResultItem {
                    title: r.title,
                    url: r.url,
                    snippet: r.description,
                    display_url,
                }
            })
            .take(count)
            .collect())
    }

    async fn image_search(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<ImageCandidate>, SearchError> {
        let params = [
            ("q", query.to_string()),
            ("count", count.min(20).to_string()),
            ("safesearch", "strict".to_string()),
        ];

        let data: BraveImageResponse = self
            .get(IMAGE_SEARCH_PATH, &params)
            .await?
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.without_url().to_string()))?;

        Ok(data
            .results
            .into_iter()
            .filter_map(|r| {
                let url = r.properties.and_then(|p| p.url).filter(|u| !u.is_empty())?;
                Some(ImageCandidate::new(url, r.title))
            })
            .take(count)
            .collect())
    }

    fn name(&self) -> &'static str {
        "brave"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct BraveWebResponse {
    #[serde(default)]
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    #[serde(default)]
    results: Vec<BraveWebResult>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResult {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    meta_url: Option<BraveMetaUrl>,
}

#[derive(Debug, Deserialize)]
struct BraveMetaUrl {
    hostname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BraveImageResponse {
    #[serde(default)]
    results: Vec<BraveImageResult>,
}

#[derive(Debug, Deserialize)]
struct BraveImageResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    properties: Option<BraveImageProperties>,
}

#[derive(Debug, Deserialize)]
struct BraveImageProperties {
    url: Option<String>,
}
