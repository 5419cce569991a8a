// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    routing::{any, get},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

use super::harvest::{harvest_handler, health_handler, RequestRouter};
use crate::archive::ImageArchiver;
use crate::config::AppConfig;
use crate::content::PageFetcher;
use crate::search::SearchService;
use crate::storage::create_blob_store;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
    pub request_budget: Duration,
}

impl AppState {
    pub fn new(router: RequestRouter, request_budget: Duration) -> Self {
        Self {
            router: Arc::new(router),
            request_budget,
        }
    }

    /// Wire every component from a validated configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = create_blob_store(&config.storage)?;
        let search = SearchService::new(config.search.clone())?;
        let fetcher = PageFetcher::new(config.fetch.clone())?;
        let archiver = ImageArchiver::new(config.archive.clone(), store)?;

        let router = RequestRouter::new(
            Arc::new(search),
            Arc::new(fetcher),
            Arc::new(archiver),
            config.block_length_bounds(),
        );

        Ok(Self::new(router, config.server.request_budget()))
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Harvest endpoint; the router answers OPTIONS and rejects other methods itself
        .route("/v1/harvest", any(harvest_handler))
        .route("/", any(harvest_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Harvest API listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
