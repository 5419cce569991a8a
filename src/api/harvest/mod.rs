// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Harvest API endpoint
//!
//! Provides POST /v1/harvest: keyword search or single-page scrape, with
//! discovered images archived to blob storage.

pub mod handler;
pub mod request;
pub mod response;
pub mod router;

pub use handler::{harvest_handler, health_handler};
pub use request::{HarvestRequest, MAX_KEYWORD_CHARS};
pub use response::{HarvestResponse, ScrapeOutcome};
pub use router::{ApiEnvelope, RequestRouter, CORS_HEADERS};
