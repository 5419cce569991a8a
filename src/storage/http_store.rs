// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! S3-compatible object gateway client
//!
//! Talks plain HTTP to a bucket endpoint that accepts `HEAD` and `PUT` on
//! `{endpoint}/{key}`. Request signing is the gateway's concern; this client
//! only attaches an optional bearer token.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use super::blob_store::{validate_key, BlobStore, StorageError};
use crate::utils::SecretString;

pub struct HttpBlobStore {
    client: Client,
    endpoint: String,
    public_base_url: String,
    api_token: Option<SecretString>,
    timeout: Duration,
}

impl HttpBlobStore {
    pub fn new(
        endpoint: impl Into<String>,
        public_base_url: impl Into<String>,
        api_token: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.is_empty()),
            timeout,
        })
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}", self.endpoint, key)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> StorageError {
        if e.is_timeout() {
            StorageError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            // without_url keeps presigned query strings out of logs
            StorageError::NetworkError(e.without_url().to_string())
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;

        let response = self
            .authorize(self.client.head(self.object_url(key)))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => {
                warn!("HEAD {} returned HTTP {}", key, status.as_u16());
                Err(StorageError::Rejected {
                    status: status.as_u16(),
                })
            }
        }
    }

    async fn put(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(key)?;
        let size = data.len();

        let response = self
            .authorize(self.client.put(self.object_url(key)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Rejected {
                status: status.as_u16(),
            });
        }

        debug!("Stored {} ({} bytes, {})", key, size, content_type);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
