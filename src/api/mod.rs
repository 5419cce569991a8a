// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod harvest;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use harvest::{
    harvest_handler, health_handler, ApiEnvelope, HarvestRequest, HarvestResponse,
    RequestRouter, ScrapeOutcome, CORS_HEADERS,
};
pub use http_server::{create_app, start_server, AppState};
