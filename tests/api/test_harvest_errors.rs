// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Validation and method handling; none of these reach an upstream

use crate::common::{build_router, memory_store, post, UNUSED_SEARCH_BASE};
use keyword_harvest::api::CORS_HEADERS;
use serde_json::json;

#[tokio::test]
async fn test_empty_keyword_rejected_regardless_of_url() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let bodies = [
        json!({}),
        json!({"keyword": ""}),
        json!({"keyword": "   "}),
        json!({"url": "https://example.test/page"}),
        json!({"keyword": "", "url": "https://example.test/page"}),
        json!({"keyword": null, "url": "https://example.test/page"}),
    ];

    for body in bodies {
        let (status, response) = post(&router, body.clone()).await;
        assert_eq!(status, 400, "body {}", body);
        assert_eq!(response["error_type"], "validation_error");
        assert!(response["error"].as_str().unwrap().contains("keyword"));
    }
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    for url in ["example.test/page", "ftp://example.test/", "mailto:a@example.test"] {
        let (status, response) = post(&router, json!({"keyword": "a", "url": url})).await;
        assert_eq!(status, 400, "url {}", url);
        assert_eq!(response["error_type"], "validation_error");
    }
}

#[tokio::test]
async fn test_private_target_rejected_without_fetching() {
    // The shared fixture router allows loopback, so build the default guard here
    use keyword_harvest::content::{ContentFetchConfig, FetchError, PageFetcher};

    let fetcher = PageFetcher::new(ContentFetchConfig::default()).unwrap();
    let result = fetcher.fetch("http://10.0.0.1/admin").await;
    assert!(matches!(result, Err(FetchError::UnsafeUrl(_))));
}

#[tokio::test]
async fn test_keyword_too_long_rejected() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, response) = post(&router, json!({"keyword": "k".repeat(501)})).await;
    assert_eq!(status, 400);
    assert_eq!(response["error_type"], "validation_error");
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    for raw in ["", "{", "keyword=rust", "[1,2,3]"] {
        let envelope = router.handle("POST", raw.as_bytes()).await;
        assert_eq!(envelope.status, 400, "body {:?}", raw);
        assert_eq!(envelope.json().unwrap()["error_type"], "validation_error");
    }
}

#[tokio::test]
async fn test_options_preflight() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let envelope = router.handle("OPTIONS", b"").await;

    assert_eq!(envelope.status, 200);
    assert!(envelope.body.is_empty());
    assert_eq!(envelope.headers, CORS_HEADERS.to_vec());
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    for method in ["GET", "PUT", "DELETE"] {
        let envelope = router.handle(method, b"").await;
        assert_eq!(envelope.status, 405);
        assert_eq!(envelope.json().unwrap()["error_type"], "method_not_allowed");
        assert_eq!(envelope.headers, CORS_HEADERS.to_vec());
    }
}

#[tokio::test]
async fn test_error_envelopes_carry_cors_headers() {
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let envelope = router.handle("POST", br#"{"keyword": ""}"#).await;

    for header in CORS_HEADERS {
        assert!(envelope.headers.contains(header), "missing {:?}", header);
    }
}
