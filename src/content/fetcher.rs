//! HTTP page fetching with timeouts, size limits and redirect caps
//!
//! Fetches the single page a scrape-mode request points at.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::config::ContentFetchConfig;
use crate::utils::net::{self, BodyError};

/// A fetched HTML document
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was requested
    pub url: Url,
    /// URL after redirects; relative links resolve against this
    pub final_url: Url,
    /// Media type from the response, if the server sent one
    pub content_type: Option<String>,
    /// Body decoded as UTF-8 (invalid sequences replaced)
    pub html: String,
}

/// Content fetch error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed or is not http(s)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// URL is unsafe (localhost, private IP)
    #[error("Unsafe URL blocked: {0}")]
    UnsafeUrl(String),
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),
    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    HttpStatus(u16, String),
    /// Redirect loop or more redirects than allowed
    #[error("Too many redirects for: {0}")]
    TooManyRedirects(String),
    /// Response is not an HTML document
    #[error("Not an HTML page ({content_type}): {url}")]
    NotHtml { content_type: String, url: String },
    /// Response body exceeded the configured ceiling
    #[error("Page exceeds {limit} bytes: {url}")]
    TooLarge { limit: usize, url: String },
    /// Any other HTTP request error
    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Fetches single pages for extraction
pub struct PageFetcher {
    client: Client,
    config: ContentFetchConfig,
}

impl PageFetcher {
    /// Create a new page fetcher
    pub fn new(config: ContentFetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Fetch one page
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        // Validate URL safety
        if !self.config.allow_private_hosts && !net::is_safe_url(&parsed) {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        debug!("Fetching page: {}", url);

        let response = self
            .client
            .get(parsed.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(
                reqwest::header::ACCEPT_LANGUAGE,
                self.config.accept_language.as_str(),
            )
            .send()
            .await
            .map_err(|e| Self::map_request_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16(), url.to_string()));
        }

        let final_url = response.url().clone();
        if !self.config.allow_private_hosts && !net::is_safe_url(&final_url) {
            return Err(FetchError::UnsafeUrl(final_url.to_string()));
        }

        let content_type = net::media_type(&response);
        if let Some(ref ct) = content_type {
            if !is_html_media_type(ct) {
                return Err(FetchError::NotHtml {
                    content_type: ct.clone(),
                    url: url.to_string(),
                });
            }
        }

        let body = net::read_body_limited(response, self.config.max_bytes)
            .await
            .map_err(|e| match e {
                BodyError::TooLarge { limit } => FetchError::TooLarge {
                    limit,
                    url: url.to_string(),
                },
                BodyError::Transport(e) => Self::map_request_error(e, url),
            })?;

        let html = String::from_utf8_lossy(&body).into_owned();
        info!("Fetched {} bytes from: {}", body.len(), final_url);

        Ok(FetchedPage {
            url: parsed,
            final_url,
            content_type,
            html,
        })
    }

    fn map_request_error(e: reqwest::Error, url: &str) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(url.to_string())
        } else if e.is_redirect() {
            FetchError::TooManyRedirects(url.to_string())
        } else {
            FetchError::HttpError(e.without_url().to_string())
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ContentFetchConfig {
        &self.config
    }
}

/// Media types accepted as HTML documents
fn is_html_media_type(media_type: &str) -> bool {
    matches!(media_type, "text/html" | "application/xhtml+xml")
}
