// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image types shared by search, extraction and archiving

use serde::{Deserialize, Serialize};

/// An image reference discovered by search or extraction, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// Absolute http(s) URL of the image
    pub original_url: String,
    /// Alt text (empty when the source had none)
    #[serde(default)]
    pub alt: String,
}

impl ImageCandidate {
    pub fn new(original_url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            alt: alt.into(),
        }
    }
}

/// An image that was downloaded and written to the blob store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    /// Where the image was downloaded from
    pub original_url: String,
    /// Public URL of the stored object
    #[serde(rename = "s3_url")]
    pub stored_url: String,
    /// Alt text carried over from the candidate
    pub alt: String,
}
