//! Object store trait for S3-compatible document storage.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A presigned HTTP request a browser can perform without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedRequest {
    /// HTTP method the URL is signed for (`PUT` or `GET`).
    pub method: String,
    /// The signed URL.
    pub url: String,
    /// Object key the URL points at.
    pub key: String,
    /// Lifetime of the signature in seconds.
    pub expires_in: u64,
    /// Absolute expiry instant.
    pub expires_at: DateTime<Utc>,
}

/// Trait for object storage backends.
///
/// Keys are always relative to the configured bucket. The production
/// implementation talks to S3 through `aws-sdk-s3`; an in-memory
/// implementation backs tests and local development.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Issue a presigned PUT URL for uploading `key` directly from a client.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<PresignedRequest>;

    /// Issue a presigned GET URL for downloading `key`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<PresignedRequest>;

    /// Upload bytes to `key`, replacing any existing object.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Delete the object at `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists at `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
