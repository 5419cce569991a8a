// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures: in-process HTTP servers standing in for the search
//! provider and for target sites, plus a router wired to a memory blob store.
#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use keyword_harvest::api::{create_app, AppState, RequestRouter};
use keyword_harvest::archive::{ArchiveConfig, ImageArchiver};
use keyword_harvest::content::{BlockLengthBounds, ContentFetchConfig, PageFetcher};
use keyword_harvest::search::{SearchConfig, SearchService};
use keyword_harvest::storage::MemoryBlobStore;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const PUBLIC_BASE: &str = "https://harvest-images.s3.ap-northeast-1.amazonaws.com";

pub const PYTHON_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Python Notes</title>
    <meta name="description" content="Notes about Python">
</head>
<body>
    <nav><p>Python home</p></nav>
    <p>Python is a programming language.</p>
    <p>Nothing to see in this paragraph.</p>
    <p>Many people learn Python first.</p>
    <img src="/img/logo.png" alt="logo">
</body>
</html>"#;

/// Bind an app to an ephemeral loopback port and return its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Bytes that sniff as PNG; distinct per seed
pub fn png_bytes(seed: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(format!("fixture-image-{}", seed).as_bytes());
    bytes
}

fn png_response(seed: &str) -> Response {
    ([(header::CONTENT_TYPE, "image/png")], png_bytes(seed)).into_response()
}

/// A target site with pages and images
pub async fn spawn_site() -> String {
    let app = Router::new()
        .route("/page", get(|| async { Html(PYTHON_PAGE) }))
        .route(
            "/empty-page",
            get(|| async { Html("<html><head><title>Empty</title></head><body><p>Nothing here.</p></body></html>") }),
        )
        .route(
            "/broken-images",
            get(|| async {
                Html(
                    r#"<html><body>
                        <p>Python pictures</p>
                        <img src="/missing.png">
                        <img src="/img/ok.png" alt="ok">
                        <img src="/page">
                    </body></html>"#,
                )
            }),
        )
        .route(
            "/no-content-type",
            get(|| async { Response::new(Body::from("<html><body><p>Python raw</p></body></html>")) }),
        )
        .route(
            "/doc.pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], "%PDF-1.4") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Html(PYTHON_PAGE)
            }),
        )
        .route(
            "/redirect-loop",
            get(|| async { Redirect::temporary("/redirect-loop") }),
        )
        .route("/img/:name", get(|Path(name): Path<String>| async move { png_response(&name) }))
        .route(
            "/slow-img/:name",
            get(|Path(name): Path<String>| async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                png_response(&name)
            }),
        )
        .route("/same/:name", get(|| async { png_response("same") }));

    spawn(app).await
}

/// Scripted Brave Search responses
#[derive(Debug, Clone, Default)]
pub struct BraveFixture {
    pub web_results: usize,
    pub image_urls: Vec<String>,
    pub web_status: Option<StatusCode>,
    pub image_status: Option<StatusCode>,
}

async fn brave_web(
    State(fixture): State<Arc<BraveFixture>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(status) = fixture.web_status {
        return (status, "provider failure details").into_response();
    }

    let keyword = params.get("q").cloned().unwrap_or_default();
    let results: Vec<Value> = (0..fixture.web_results)
        .map(|i| {
            json!({
                "title": format!("{} result {}", keyword, i),
                "url": format!("https://site{}.example/{}", i, keyword),
                "description": format!("About {}", keyword),
                "meta_url": { "hostname": format!("site{}.example", i) }
            })
        })
        .collect();

    Json(json!({ "web": { "results": results } })).into_response()
}

async fn brave_images(State(fixture): State<Arc<BraveFixture>>) -> Response {
    if let Some(status) = fixture.image_status {
        return (status, "provider failure details").into_response();
    }

    let results: Vec<Value> = fixture
        .image_urls
        .iter()
        .enumerate()
        .map(|(i, url)| json!({ "title": format!("image {}", i), "properties": { "url": url } }))
        .collect();

    Json(json!({ "results": results })).into_response()
}

/// A Brave Search stand-in
pub async fn spawn_brave(fixture: BraveFixture) -> String {
    let app = Router::new()
        .route("/res/v1/web/search", get(brave_web))
        .route("/res/v1/images/search", get(brave_images))
        .with_state(Arc::new(fixture));

    spawn(app).await
}

/// Router whose outbound calls may reach loopback fixtures
pub fn build_router(search_base: &str, store: Arc<MemoryBlobStore>) -> RequestRouter {
    let search = SearchService::new(SearchConfig {
        brave_api_key: Some("fixture-key".into()),
        base_url: search_base.to_string(),
        request_timeout_ms: 2000,
        ..SearchConfig::default()
    })
    .unwrap();

    let fetcher = PageFetcher::new(ContentFetchConfig {
        timeout_secs: 1,
        allow_private_hosts: true,
        ..ContentFetchConfig::default()
    })
    .unwrap();

    let archiver = ImageArchiver::new(
        ArchiveConfig {
            timeout_per_image_secs: 2,
            allow_private_hosts: true,
            ..ArchiveConfig::default()
        },
        store,
    )
    .unwrap();

    RequestRouter::new(
        Arc::new(search),
        Arc::new(fetcher),
        Arc::new(archiver),
        BlockLengthBounds::default(),
    )
}

pub fn memory_store() -> Arc<MemoryBlobStore> {
    Arc::new(MemoryBlobStore::new(PUBLIC_BASE))
}

/// Full axum app over `build_router`
pub fn build_app(search_base: &str, store: Arc<MemoryBlobStore>, budget: Duration) -> Router {
    create_app(AppState::new(build_router(search_base, store), budget))
}

/// POST a JSON body through the router; returns status and parsed body
pub async fn post(router: &RequestRouter, body: Value) -> (u16, Value) {
    let envelope = router.handle("POST", body.to_string().as_bytes()).await;
    let json = envelope.json().unwrap();
    (envelope.status, json)
}

/// Search base URL that is never contacted
pub const UNUSED_SEARCH_BASE: &str = "http://127.0.0.1:9";
