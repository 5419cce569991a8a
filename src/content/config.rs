//! Configuration for page fetching and extraction
//!
//! Defines settings for HTTP fetching, size limits, and match filtering.

use std::env;

/// Browser-like User-Agent; many sites refuse obvious bot agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Configuration for fetching and extracting a single page
#[derive(Debug, Clone)]
pub struct ContentFetchConfig {
    /// Timeout for the page fetch in seconds (default: 15)
    pub timeout_secs: u64,
    /// Maximum page size in bytes (default: 5 MiB)
    pub max_bytes: usize,
    /// Maximum redirects followed (default: 5)
    pub max_redirects: usize,
    /// Allow loopback/private hosts (default: false)
    pub allow_private_hosts: bool,
    /// Drop matching blocks shorter than this many characters (default: off)
    pub min_block_chars: Option<usize>,
    /// Drop matching blocks longer than this many characters (default: off)
    pub max_block_chars: Option<usize>,
    /// User-Agent header sent with the fetch
    pub user_agent: String,
    /// Accept-Language header sent with the fetch
    pub accept_language: String,
}

impl ContentFetchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            max_bytes: env::var("FETCH_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_bytes),
            max_redirects: env::var("FETCH_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects)
                .min(10), // Cap at 10
            allow_private_hosts: env::var("FETCH_ALLOW_PRIVATE_HOSTS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            min_block_chars: env::var("EXTRACT_MIN_BLOCK_CHARS")
                .ok()
                .and_then(|v| v.parse().ok()),
            max_block_chars: env::var("EXTRACT_MAX_BLOCK_CHARS")
                .ok()
                .and_then(|v| v.parse().ok()),
            user_agent: env::var("FETCH_USER_AGENT").unwrap_or(defaults.user_agent),
            accept_language: env::var("FETCH_ACCEPT_LANGUAGE")
                .unwrap_or(defaults.accept_language),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if self.max_bytes < 1024 {
            return Err("max_bytes must be at least 1024".to_string());
        }
        if let (Some(min), Some(max)) = (self.min_block_chars, self.max_block_chars) {
            if min > max {
                return Err("min_block_chars cannot exceed max_block_chars".to_string());
            }
        }
        Ok(())
    }
}

impl Default for ContentFetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_bytes: 5 * 1024 * 1024,
            max_redirects: 5,
            allow_private_hosts: false,
            min_block_chars: None,
            max_block_chars: None,
            user_agent: BROWSER_USER_AGENT.to_string(),
            accept_language: "ja,en-US;q=0.7,en;q=0.3".to_string(),
        }
    }
}
