// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Blob storage for archived images
//!
//! The archiver only needs `put_if_absent(key, bytes, content_type) -> public URL`.
//! Three backends implement it:
//! - `HttpBlobStore`: S3-compatible object gateway (production)
//! - `LocalBlobStore`: directory on disk (single-host deployments)
//! - `MemoryBlobStore`: in-process map (tests, local development)

pub mod blob_store;
pub mod config;
pub mod http_store;
pub mod local;
pub mod memory;

pub use blob_store::{validate_key, BlobStore, StorageError};
pub use config::{create_blob_store, StorageBackend, StorageConfig};
pub use http_store::HttpBlobStore;
pub use local::LocalBlobStore;
pub use memory::{MemoryBlobStore, MemoryObject};
