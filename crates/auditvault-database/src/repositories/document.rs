//! Document repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_entity::document::{CreateDocument, Document, DocumentWithAccess};

use super::map_write_error;

/// Rows a user may see: uploaded by them, in a folder they own, or in a
/// folder whose project lists them as an auditor. Binds the user as `$1`.
const ACCESSIBLE_FILTER: &str = "(d.uploaded_by = $1 OR f.owner_id = $1 OR EXISTS ( \
         SELECT 1 FROM projects p JOIN project_auditors pa ON pa.project_id = p.id \
         WHERE p.folder_id = d.folder_id AND pa.auditor_id = $1))";

const URL_CONFLICT: &[(&str, &str)] = &[(
    "documents_url_key",
    "A document with this object key already exists",
)];

/// Repository for document rows.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a document by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// Find a document together with its folder owner and project auditors.
    pub async fn find_with_access(&self, id: Uuid) -> AppResult<Option<DocumentWithAccess>> {
        sqlx::query_as::<_, DocumentWithAccess>(
            "SELECT d.id, d.url, d.folder_id, d.uploaded_by, d.created_at, d.updated_at, \
                    f.owner_id AS folder_owner_id, \
                    COALESCE(( \
                        SELECT array_agg(pa.auditor_id) FROM projects p \
                        JOIN project_auditors pa ON pa.project_id = p.id \
                        WHERE p.folder_id = d.folder_id \
                    ), '{}') AS project_auditor_ids \
             FROM documents d JOIN folders f ON f.id = d.folder_id \
             WHERE d.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load document access", e))
    }

    /// List documents the user can access, newest first.
    pub async fn find_accessible(
        &self,
        user_id: Uuid,
        folder_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Document>> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM documents d JOIN folders f ON f.id = d.folder_id \
             WHERE {ACCESSIBLE_FILTER} AND ($2::UUID IS NULL OR d.folder_id = $2)"
        ))
        .bind(user_id)
        .bind(folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))?;

        let documents = sqlx::query_as::<_, Document>(&format!(
            "SELECT d.* FROM documents d JOIN folders f ON f.id = d.folder_id \
             WHERE {ACCESSIBLE_FILTER} AND ($2::UUID IS NULL OR d.folder_id = $2) \
             ORDER BY d.created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(user_id)
        .bind(folder_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        Ok(PageResponse::new(
            documents,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// All documents created strictly before `cutoff`, oldest first.
    pub async fn find_created_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE created_at < $1 ORDER BY created_at ASC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list expired documents", e)
        })
    }

    /// Create a new document record.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents (id, url, folder_id, uploaded_by) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.url)
        .bind(data.folder_id)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create document", URL_CONFLICT))
    }

    /// Delete a document row by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete document", e))?;

        Ok(result.rows_affected() > 0)
    }
}
