// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::FetchError;
use crate::search::SearchError;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Body is not a JSON object
    InvalidRequest(String),
    ValidationError {
        field: String,
        message: String,
    },
    MethodNotAllowed(String),
    /// Search provider failed
    UpstreamError(String),
    /// Search provider timed out
    UpstreamTimeout(String),
    /// Search provider rate-limited us
    RateLimitExceeded {
        retry_after: u64,
    },
    /// Target page could not be fetched
    FetchError(String),
    /// Target page fetch timed out
    FetchTimeout(String),
    InternalError(String),
    /// Whole-request budget exhausted
    Timeout,
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            error_type: self.error_type().to_string(),
        }
    }

    /// Machine-readable tag carried in `error_type`
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) | ApiError::ValidationError { .. } => "validation_error",
            ApiError::MethodNotAllowed(_) => "method_not_allowed",
            ApiError::UpstreamError(_) | ApiError::RateLimitExceeded { .. } => "upstream_error",
            ApiError::FetchError(_) => "fetch_error",
            ApiError::UpstreamTimeout(_) | ApiError::FetchTimeout(_) | ApiError::Timeout => {
                "timeout"
            }
            ApiError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) | ApiError::ValidationError { .. } => 400,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::RateLimitExceeded { .. } => 429,
            ApiError::UpstreamError(_) | ApiError::FetchError(_) => 502,
            ApiError::UpstreamTimeout(_) | ApiError::FetchTimeout(_) | ApiError::Timeout => 504,
            ApiError::InternalError(_) => 500,
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::MethodNotAllowed(method) => write!(f, "Method not allowed: {}", method),
            ApiError::UpstreamError(msg) => write!(f, "Search provider error: {}", msg),
            ApiError::UpstreamTimeout(msg) => write!(f, "Search provider timed out: {}", msg),
            ApiError::RateLimitExceeded { retry_after } => write!(
                f,
                "Search provider rate limit exceeded, retry after {} seconds",
                retry_after
            ),
            ApiError::FetchError(msg) => write!(f, "Failed to fetch page: {}", msg),
            ApiError::FetchTimeout(msg) => write!(f, "Page fetch timed out: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::RateLimited { retry_after_secs } => ApiError::RateLimitExceeded {
                retry_after: retry_after_secs,
            },
            SearchError::Timeout { .. } => ApiError::UpstreamTimeout(e.to_string()),
            SearchError::InvalidQuery { reason } => ApiError::validation("keyword", reason),
            SearchError::NoApiKey { .. } => {
                ApiError::InternalError("search provider is not configured".to_string())
            }
            other => ApiError::UpstreamError(other.to_string()),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout(_) => ApiError::FetchTimeout(e.to_string()),
            FetchError::InvalidUrl(url) => {
                ApiError::validation("url", format!("not an absolute http(s) URL: {}", url))
            }
            FetchError::UnsafeUrl(url) => ApiError::validation(
                "url",
                format!("target host is not publicly routable: {}", url),
            ),
            other => ApiError::FetchError(other.to_string()),
        }
    }
}
