//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use auditvault_core::error::AppError;

use crate::executor::{JobHandler, run_logged};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler })
    }

    /// Run `handler` on a six-field cron `schedule` (seconds first, UTC).
    pub async fn register(
        &self,
        schedule: &str,
        handler: Arc<dyn JobHandler>,
    ) -> Result<(), AppError> {
        let job_type = handler.job_type().to_string();
        let task = Arc::clone(&handler);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let task = Arc::clone(&task);
            Box::pin(async move {
                // errors are logged by run_logged; the next tick runs again
                let _ = run_logged(task.as_ref()).await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid schedule '{schedule}' for {job_type}: {e}"
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add {job_type} schedule: {e}"))
        })?;

        tracing::info!(job_type = %job_type, schedule, "Registered scheduled job");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::executor::JobExecutionError;

    #[derive(Debug)]
    struct Noop;

    #[async_trait]
    impl JobHandler for Noop {
        fn job_type(&self) -> &str {
            "noop"
        }

        async fn execute(&self) -> Result<Value, JobExecutionError> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn test_invalid_schedule_is_configuration_error() {
        let scheduler = CronScheduler::new().await.unwrap();
        let err = scheduler
            .register("every tuesday-ish", Arc::new(Noop))
            .await
            .unwrap_err();
        assert_eq!(err.kind, auditvault_core::error::ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_valid_schedule_registers() {
        let scheduler = CronScheduler::new().await.unwrap();
        assert!(scheduler.register("0 0 3 * * *", Arc::new(Noop)).await.is_ok());
    }
}
