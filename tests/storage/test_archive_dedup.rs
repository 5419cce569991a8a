// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Content-addressed keys: identical bytes share one object across requests

use crate::common::{build_router, memory_store, post, spawn_brave, spawn_site, BraveFixture};
use keyword_harvest::archive::{content_key, ArchiveConfig, ImageArchiver, ImageCandidate};
use keyword_harvest::storage::StorageError;
use serde_json::json;

#[tokio::test]
async fn test_identical_bytes_share_stored_url_across_requests() {
    let site = spawn_site().await;
    let brave_a = spawn_brave(BraveFixture {
        web_results: 1,
        image_urls: vec![format!("{}/same/a.png", site)],
        ..BraveFixture::default()
    })
    .await;
    let brave_b = spawn_brave(BraveFixture {
        web_results: 1,
        image_urls: vec![format!("{}/same/b.png", site)],
        ..BraveFixture::default()
    })
    .await;

    let store = memory_store();
    let (status_a, first) = post(&build_router(&brave_a, store.clone()), json!({"keyword": "a"})).await;
    let (status_b, second) = post(&build_router(&brave_b, store.clone()), json!({"keyword": "b"})).await;

    assert_eq!(status_a, 200);
    assert_eq!(status_b, 200);
    assert_ne!(first["images"][0]["original_url"], second["images"][0]["original_url"]);
    assert_eq!(first["images"][0]["s3_url"], second["images"][0]["s3_url"]);

    // Second request found the key and skipped the write
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_stored_object_matches_content_key() {
    let site = spawn_site().await;
    let store = memory_store();
    let archiver = ImageArchiver::new(
        ArchiveConfig {
            allow_private_hosts: true,
            ..ArchiveConfig::default()
        },
        store.clone(),
    )
    .unwrap();

    let stored = archiver
        .archive(vec![ImageCandidate::new(format!("{}/img/k.png", site), "k")])
        .await;

    assert_eq!(stored.len(), 1);
    let key = content_key(&crate::common::png_bytes("k.png"), "image/png");
    assert!(stored[0].stored_url.ends_with(&key));

    let object = store.get(&key).await.unwrap();
    assert_eq!(object.content_type, "image/png");
    assert_eq!(object.data, crate::common::png_bytes("k.png"));
}

#[tokio::test]
async fn test_storage_failure_drops_only_that_image() {
    let site = spawn_site().await;
    let store = memory_store();
    store
        .inject_error(StorageError::Rejected { status: 503 })
        .await;

    let archiver = ImageArchiver::new(
        ArchiveConfig {
            allow_private_hosts: true,
            concurrency: 1,
            ..ArchiveConfig::default()
        },
        store.clone(),
    )
    .unwrap();

    let stored = archiver
        .archive(vec![
            ImageCandidate::new(format!("{}/img/first.png", site), ""),
            ImageCandidate::new(format!("{}/img/second.png", site), ""),
        ])
        .await;

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].original_url, format!("{}/img/second.png", site));
}

#[tokio::test]
async fn test_archive_caps_at_ten_candidates() {
    let site = spawn_site().await;
    let store = memory_store();
    let archiver = ImageArchiver::new(
        ArchiveConfig {
            allow_private_hosts: true,
            ..ArchiveConfig::default()
        },
        store.clone(),
    )
    .unwrap();

    let candidates = (0..15)
        .map(|i| ImageCandidate::new(format!("{}/img/{}.png", site, i), ""))
        .collect();
    let stored = archiver.archive(candidates).await;

    assert_eq!(stored.len(), 10);
    assert_eq!(stored[9].original_url, format!("{}/img/9.png", site));
}
