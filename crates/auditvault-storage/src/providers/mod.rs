//! Object store provider implementations.

pub mod memory;
#[cfg(feature = "s3")]
pub mod s3;

use std::sync::Arc;

use auditvault_core::config::StorageConfig;
use auditvault_core::error::AppError;
use auditvault_core::result::AppResult;
use auditvault_core::traits::ObjectStore;

pub use memory::MemoryObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

/// Build the provider selected by `storage.provider`.
pub async fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "memory" => {
            tracing::warn!("Using in-memory object store; documents are lost on restart");
            Ok(Arc::new(MemoryObjectStore::new("memory")))
        }
        #[cfg(feature = "s3")]
        "s3" => Ok(Arc::new(S3ObjectStore::connect(&config.s3).await?)),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'"
        ))),
    }
}
