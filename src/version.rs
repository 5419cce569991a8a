// Version information for keyword-harvest

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-content-addressed-images-2026-10-01";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2026-10-01";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "search-mode",
    "scrape-mode",
    "image-search",
    "content-addressed-images",
    "cors-preflight",
    "request-budget",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("keyword-harvest {} ({})", VERSION_NUMBER, BUILD_DATE)
}
