//! Deletes documents older than the retention window.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use auditvault_core::error::AppError;
use auditvault_core::traits::storage::ObjectStore;
use auditvault_database::repositories::DocumentRepository;
use auditvault_entity::document::Document;

/// Outcome of one cleanup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Documents older than the cutoff.
    pub scanned: usize,
    /// Documents whose object and row were removed.
    pub deleted: usize,
    /// Documents left in place because a delete failed.
    pub failed: usize,
    /// Documents created before this instant were eligible.
    pub cutoff: DateTime<Utc>,
}

/// Removes expired documents from the object store and the database.
#[derive(Debug, Clone)]
pub struct CleanupService {
    document_repo: Arc<DocumentRepository>,
    store: Arc<dyn ObjectStore>,
    retention_days: i64,
}

impl CleanupService {
    /// Creates a new cleanup service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        store: Arc<dyn ObjectStore>,
        retention_days: i64,
    ) -> Self {
        Self {
            document_repo,
            store,
            retention_days,
        }
    }

    /// Delete every expired document concurrently.
    ///
    /// Failures are counted and logged, never retried. A document whose
    /// object could not be removed keeps its row so the next run sees it.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<CleanupReport, AppError> {
        let cutoff = retention_cutoff(now, self.retention_days);
        let expired = self.document_repo.find_created_before(cutoff).await?;
        let scanned = expired.len();

        let results = join_all(expired.iter().map(|doc| self.remove(doc))).await;
        let deleted = results.iter().filter(|ok| **ok).count();

        let report = CleanupReport {
            scanned,
            deleted,
            failed: scanned - deleted,
            cutoff,
        };
        info!(
            scanned = report.scanned,
            deleted = report.deleted,
            failed = report.failed,
            cutoff = %cutoff,
            "Document cleanup finished"
        );
        Ok(report)
    }

    async fn remove(&self, doc: &Document) -> bool {
        if let Err(e) = self.store.delete(&doc.url).await {
            warn!(document_id = %doc.id, key = %doc.url, error = %e, "Failed to delete object");
            return false;
        }
        match self.document_repo.delete(doc.id).await {
            Ok(_) => true,
            Err(e) => {
                warn!(document_id = %doc.id, error = %e, "Failed to delete document row");
                false
            }
        }
    }
}

/// Instant before which documents have outlived `retention_days`.
///
/// Saturates at the earliest representable instant, so an out-of-range
/// retention keeps every document.
pub fn retention_cutoff(now: DateTime<Utc>, retention_days: i64) -> DateTime<Utc> {
    Duration::try_days(retention_days)
        .and_then(|d| now.checked_sub_signed(d))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
