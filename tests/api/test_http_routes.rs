// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Route registration, CORS headers and the request budget through the axum app

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

use crate::common::{build_app, memory_store, spawn_site, UNUSED_SEARCH_BASE};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_secs(29));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_harvest_routes_share_one_handler() {
    for uri in ["/v1/harvest", "/"] {
        let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_secs(29));

        let response = app.oneshot(post_json(uri, r#"{"keyword": ""}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(
            response.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        let json = body_json(response).await;
        assert_eq!(json["error_type"], "validation_error");
    }
}

#[tokio::test]
async fn test_options_preflight_route() {
    let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_secs(29));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/v1/harvest")
                .header("origin", "https://frontend.example")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["access-control-allow-methods"],
        "POST,OPTIONS"
    );
    assert_eq!(
        response.headers()["access-control-allow-headers"],
        "Content-Type,X-Amz-Date,Authorization,X-Api-Key"
    );
}

#[tokio::test]
async fn test_get_on_harvest_is_json_405() {
    let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_secs(29));

    let response = app
        .oneshot(Request::get("/v1/harvest").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "method_not_allowed");
}

#[tokio::test]
async fn test_scrape_through_app() {
    let site = spawn_site().await;
    let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_secs(29));
    let body = format!(r#"{{"keyword": "Python", "url": "{}/page"}}"#, site);

    let response = app.oneshot(post_json("/v1/harvest", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let json = body_json(response).await;
    assert_eq!(json["match_count"], 2);
    assert_eq!(json["image_count"], 1);
}

#[tokio::test]
async fn test_exhausted_budget_is_504_with_cors() {
    let site = spawn_site().await;
    // Budget shorter than the fixture fetch timeout
    let app = build_app(UNUSED_SEARCH_BASE, memory_store(), Duration::from_millis(300));
    let body = format!(r#"{{"keyword": "Python", "url": "{}/slow"}}"#, site);

    let response = app.oneshot(post_json("/v1/harvest", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    let json = body_json(response).await;
    assert_eq!(json["error_type"], "timeout");
    assert_eq!(json["error"], "Request timed out");
}
