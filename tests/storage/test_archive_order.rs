// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Archived images come back in candidate order, not completion order

use crate::common::{memory_store, spawn_site};
use keyword_harvest::archive::{ArchiveConfig, ImageArchiver, ImageCandidate};

#[tokio::test]
async fn test_slow_first_candidate_keeps_its_position() {
    let site = spawn_site().await;
    let archiver = ImageArchiver::new(
        ArchiveConfig {
            concurrency: 4,
            allow_private_hosts: true,
            ..ArchiveConfig::default()
        },
        memory_store(),
    )
    .unwrap();

    // Candidate 0 finishes last; 1..3 answer immediately
    let candidates = vec![
        ImageCandidate::new(format!("{}/slow-img/0.png", site), "0"),
        ImageCandidate::new(format!("{}/img/1.png", site), "1"),
        ImageCandidate::new(format!("{}/img/2.png", site), "2"),
        ImageCandidate::new(format!("{}/img/3.png", site), "3"),
    ];

    let stored = archiver.archive(candidates).await;

    let alts: Vec<&str> = stored.iter().map(|image| image.alt.as_str()).collect();
    assert_eq!(alts, vec!["0", "1", "2", "3"]);
    assert_eq!(stored[0].original_url, format!("{}/slow-img/0.png", site));
}

#[tokio::test]
async fn test_dropped_candidate_does_not_shift_later_order() {
    let site = spawn_site().await;
    let archiver = ImageArchiver::new(
        ArchiveConfig {
            concurrency: 4,
            allow_private_hosts: true,
            ..ArchiveConfig::default()
        },
        memory_store(),
    )
    .unwrap();

    let candidates = vec![
        ImageCandidate::new(format!("{}/slow-img/a.png", site), "a"),
        ImageCandidate::new(format!("{}/missing.png", site), "gone"),
        ImageCandidate::new(format!("{}/img/b.png", site), "b"),
    ];

    let stored = archiver.archive(candidates).await;

    let alts: Vec<&str> = stored.iter().map(|image| image.alt.as_str()).collect();
    assert_eq!(alts, vec!["a", "b"]);
}
