// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image archiving
//!
//! ```text
//! ImageCandidate (URL + alt) → download → sniff media type → sha256 → images/<hash>.<ext>
//!                                                                    ↓
//!                                                    BlobStore::put_if_absent → public URL
//! ```

pub mod archiver;
pub mod config;
pub mod media;
pub mod types;

pub use archiver::{content_key, ArchiveError, ImageArchiver};
pub use config::{ArchiveConfig, MAX_IMAGES};
pub use types::{ImageCandidate, StoredImage};
