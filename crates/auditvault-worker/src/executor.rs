//! Job handler contract and execution wrapper.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing;

use auditvault_core::error::AppError;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Name used in logs and schedule registration
    fn job_type(&self) -> &str;

    /// Run the job once, returning a summary of what it did
    async fn execute(&self) -> Result<Value, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Failure the next scheduled run may not repeat
    #[error("Transient job failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Run a handler, logging its duration and outcome.
pub async fn run_logged(handler: &dyn JobHandler) -> Result<Value, JobExecutionError> {
    let started = Instant::now();
    tracing::info!(job_type = handler.job_type(), "Job started");

    let result = handler.execute().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(summary) => tracing::info!(
            job_type = handler.job_type(),
            elapsed_ms,
            summary = %summary,
            "Job finished"
        ),
        Err(e) => tracing::error!(
            job_type = handler.job_type(),
            elapsed_ms,
            error = %e,
            "Job failed"
        ),
    }
    result
}
