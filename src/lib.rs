// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod archive;
pub mod config;
pub mod content;
pub mod search;
pub mod storage;
pub mod utils;
pub mod version;

// Re-export main types
pub use api::{create_app, ApiEnvelope, AppState, HarvestRequest, HarvestResponse, RequestRouter};
pub use archive::{ImageArchiver, ImageCandidate, StoredImage};
pub use config::AppConfig;
pub use content::{extract_page, PageFetcher};
pub use search::{SearchService, SearchResultItem};
pub use storage::BlobStore;
