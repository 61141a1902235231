//! Document retention cleanup job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use auditvault_service::cleanup::CleanupService;

use crate::executor::{JobExecutionError, JobHandler};

/// Deletes documents past the retention window.
#[derive(Debug)]
pub struct DocumentCleanupJob {
    service: Arc<CleanupService>,
}

impl DocumentCleanupJob {
    /// Create a new cleanup job
    pub fn new(service: Arc<CleanupService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl JobHandler for DocumentCleanupJob {
    fn job_type(&self) -> &str {
        "document_cleanup"
    }

    async fn execute(&self) -> Result<Value, JobExecutionError> {
        let report = self.service.run(Utc::now()).await?;
        serde_json::to_value(&report)
            .map_err(|e| JobExecutionError::Transient(format!("Unserializable report: {e}")))
    }
}
