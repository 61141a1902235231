//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Shortest presigned URL lifetime accepted, in seconds.
pub const MIN_PRESIGN_SECONDS: u64 = 600;
/// Longest presigned URL lifetime accepted, in seconds.
pub const MAX_PRESIGN_SECONDS: u64 = 900;

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider: `"s3"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Company segment used as the first component of every object key.
    #[serde(default = "default_company")]
    pub company: String,
    /// Lifetime of presigned upload URLs in seconds.
    #[serde(default = "default_presign_put")]
    pub presign_put_seconds: u64,
    /// Lifetime of presigned download URLs in seconds.
    #[serde(default = "default_presign_get")]
    pub presign_get_seconds: u64,
    /// Largest accepted body for a single upload chunk (default 10 MB).
    #[serde(default = "default_max_chunk")]
    pub max_chunk_bytes: usize,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            company: default_company(),
            presign_put_seconds: default_presign_put(),
            presign_get_seconds: default_presign_get(),
            max_chunk_bytes: default_max_chunk(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Use path-style addressing (`endpoint/bucket/key`).
    #[serde(default = "default_force_path_style")]
    pub force_path_style: bool,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            force_path_style: default_force_path_style(),
        }
    }
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_company() -> String {
    "default".to_string()
}

fn default_presign_put() -> u64 {
    MIN_PRESIGN_SECONDS
}

fn default_presign_get() -> u64 {
    MAX_PRESIGN_SECONDS
}

fn default_max_chunk() -> usize {
    10 * 1024 * 1024
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_force_path_style() -> bool {
    true
}
