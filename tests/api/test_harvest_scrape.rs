// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Scrape-mode tests against an in-process target site

use crate::common::{build_router, memory_store, post, spawn_site, UNUSED_SEARCH_BASE};
use serde_json::json;

#[tokio::test]
async fn test_python_page_two_matches_in_document_order() {
    let site = spawn_site().await;
    let store = memory_store();
    let router = build_router(UNUSED_SEARCH_BASE, store.clone());
    let url = format!("{}/page", site);

    let (status, body) = post(&router, json!({"keyword": "Python", "url": url})).await;

    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["mode"], "scrape");
    assert_eq!(body["keyword"], "Python");
    assert_eq!(body["url"], url);
    assert_eq!(body["title"], "Python Notes");
    assert_eq!(body["description"], "Notes about Python");
    assert_eq!(body["match_count"], 2);
    assert_eq!(
        body["matches"],
        json!([
            "Python is a programming language.",
            "Many people learn Python first."
        ])
    );
    assert_eq!(body["image_count"], 1);
    assert_eq!(body["images"][0]["original_url"], format!("{}/img/logo.png", site));
    assert_eq!(body["images"][0]["alt"], "logo");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_keyword_match_is_case_insensitive() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "PYTHON", "url": format!("{}/page", site)}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["match_count"], 2);
}

#[tokio::test]
async fn test_zero_matches_is_empty_list() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "xyz123notfound", "url": format!("{}/empty-page", site)}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["matches"], json!([]));
    assert_eq!(body["match_count"], 0);
    assert_eq!(body["title"], "Empty");
    assert_eq!(body["description"], "");
}

#[tokio::test]
async fn test_broken_images_are_dropped_not_fatal() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "Python", "url": format!("{}/broken-images", site)}),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["match_count"], 1);
    assert_eq!(body["image_count"], 1);
    assert_eq!(body["images"][0]["original_url"], format!("{}/img/ok.png", site));
}

#[tokio::test]
async fn test_missing_content_type_is_treated_as_html() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "python", "url": format!("{}/no-content-type", site)}),
    )
    .await;

    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["matches"], json!(["Python raw"]));
}

#[tokio::test]
async fn test_not_found_page_is_fetch_error() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "Python", "url": format!("{}/nope", site)}),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["error_type"], "fetch_error");
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn test_non_html_page_is_fetch_error() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "Python", "url": format!("{}/doc.pdf", site)}),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["error_type"], "fetch_error");
    assert!(body["error"].as_str().unwrap().contains("application/pdf"));
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "Python", "url": format!("{}/slow", site)}),
    )
    .await;

    assert_eq!(status, 504);
    assert_eq!(body["error_type"], "timeout");
}

#[tokio::test]
async fn test_redirect_loop_is_fetch_error() {
    let site = spawn_site().await;
    let router = build_router(UNUSED_SEARCH_BASE, memory_store());

    let (status, body) = post(
        &router,
        json!({"keyword": "Python", "url": format!("{}/redirect-loop", site)}),
    )
    .await;

    assert_eq!(status, 502);
    assert_eq!(body["error_type"], "fetch_error");
}
