//! S3-compatible object store provider.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, info};

use auditvault_core::config::S3StorageConfig;
use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_core::traits::storage::{ObjectStore, PresignedRequest};

/// Object store backed by an S3-compatible service (AWS S3, MinIO, R2...).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from configuration.
    ///
    /// Static credentials are used when an access key is configured;
    /// otherwise the default AWS provider chain applies.
    pub async fn connect(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration(
                "storage.s3.bucket is empty; set S3_BUCKET",
            ));
        }

        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if !config.access_key.is_empty() {
            loader = loader.credentials_provider(Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "auditvault-config",
            ));
        }
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.clone());
        }
        let shared = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    fn presigning(expires_in: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigned URL expiry", e)
        })
    }

    fn signed(
        key: &str,
        method: &str,
        url: &str,
        expires_in: Duration,
    ) -> PresignedRequest {
        let secs = expires_in.as_secs();
        PresignedRequest {
            method: method.to_string(),
            url: url.to_string(),
            key: key.to_string(),
            expires_in: secs,
            expires_at: Utc::now() + chrono::Duration::seconds(secs as i64),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<PresignedRequest> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presigning(expires_in)?)
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to presign upload for '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, expires_in = expires_in.as_secs(), "Presigned PUT");
        Ok(Self::signed(key, request.method(), request.uri(), expires_in))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<PresignedRequest> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning(expires_in)?)
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to presign download for '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, expires_in = expires_in.as_secs(), "Presigned GET");
        Ok(Self::signed(key, request.method(), request.uri(), expires_in))
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to upload '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, bytes = size, "Uploaded object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::storage(format!(
                    "Failed to delete '{key}': {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(key, "Deleted object");
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
            Err(e) => Err(AppError::storage(format!(
                "Failed to stat '{key}': {}",
                DisplayErrorContext(&e)
            ))),
        }
    }
}
