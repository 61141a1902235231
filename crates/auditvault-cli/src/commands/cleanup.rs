//! Run the retention cleanup once.

use std::sync::Arc;

use chrono::Utc;

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_database::repositories::DocumentRepository;
use auditvault_service::CleanupService;

use crate::output::{self, OutputFormat};

/// Delete every document older than `cleanup.retention_days`.
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let store = auditvault_storage::build_object_store(&config.storage).await?;

    let service = CleanupService::new(
        Arc::new(DocumentRepository::new(pool.clone())),
        store,
        config.cleanup.retention_days,
    );
    let report = service.run(Utc::now()).await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            println!("Retention cleanup:");
            output::print_kv("Cutoff", &report.cutoff.to_rfc3339());
            output::print_kv("Scanned", &report.scanned.to_string());
            output::print_kv("Deleted", &report.deleted.to_string());
            output::print_kv("Failed", &report.failed.to_string());
        }
    }

    pool.close().await;

    if report.failed > 0 {
        output::print_warning("Some documents could not be deleted; they will be retried next run");
    }
    Ok(())
}
