//! Page fetching and content extraction for scrape mode
//!
//! ## Architecture
//!
//! ```text
//! URL → PageFetcher → HTML → extract_page → title, description, matches, images
//!                              ↓
//!                  noise tags detached first
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = PageFetcher::new(ContentFetchConfig::from_env())?;
//! let page = fetcher.fetch("https://example.com").await?;
//! let extracted = extract_page(&page.html, &page.final_url, "rust", &bounds);
//! ```

pub mod config;
pub mod extractor;
pub mod fetcher;

pub use config::{ContentFetchConfig, BROWSER_USER_AGENT};
pub use extractor::{
    clean_text, extract_page, resolve_image_url, BlockLengthBounds, ExtractedPage,
    MAX_IMAGE_CANDIDATES, MAX_MATCHES, NOISE_TAGS, TEXT_BLOCK_TAGS,
};
pub use fetcher::{FetchError, FetchedPage, PageFetcher};
