//! In-memory object store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use auditvault_core::error::AppError;
use auditvault_core::result::AppResult;
use auditvault_core::traits::storage::{ObjectStore, PresignedRequest};

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

/// Object store kept entirely in process memory.
///
/// Presigned URLs use a `memory://` scheme and are not dereferenceable.
/// Keys registered with [`MemoryObjectStore::fail_deletes_for`] make
/// `delete` fail, which lets tests exercise partial-failure paths.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    failing: Arc<RwLock<HashSet<String>>>,
}

impl MemoryObjectStore {
    /// Create an empty store named `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Make future deletes of `key` fail.
    pub async fn fail_deletes_for(&self, key: impl Into<String>) {
        self.failing.write().await.insert(key.into());
    }

    /// Fetch a stored object.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn presign(&self, method: &str, key: &str, expires_in: Duration) -> PresignedRequest {
        let secs = expires_in.as_secs();
        PresignedRequest {
            method: method.to_string(),
            url: format!(
                "memory://{}/{key}?X-Method={method}&X-Expires={secs}",
                self.bucket
            ),
            key: key.to_string(),
            expires_in: secs,
            expires_at: Utc::now() + chrono::Duration::seconds(secs as i64),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> AppResult<PresignedRequest> {
        Ok(self.presign("PUT", key, expires_in))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> AppResult<PresignedRequest> {
        Ok(self.presign("GET", key, expires_in))
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        debug!(key, bytes = data.len(), "Stored object in memory");
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.failing.read().await.contains(key) {
            return Err(AppError::storage(format!("Simulated delete failure for '{key}'")));
        }
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }
}
