//! Folder repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_entity::folder::{CreateFolder, Folder, UpdateFolder};

use super::map_write_error;

const PERIOD_CONFLICT: &[(&str, &str)] = &[(
    "folders_period_check",
    "End date must be after start date",
)];

/// Which folders a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderScope {
    /// Every folder.
    All,
    /// Folders owned by the user.
    OwnedBy(Uuid),
    /// Folders whose project lists the user as an auditor.
    AuditedBy(Uuid),
}

/// Repository for folder CRUD and dependency checks.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List folders visible under `scope`, newest audit period first.
    pub async fn find_scoped(
        &self,
        scope: FolderScope,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Folder>> {
        let (filter, user_id) = match scope {
            FolderScope::All => ("$1::UUID IS NULL", None),
            FolderScope::OwnedBy(id) => ("f.owner_id = $1", Some(id)),
            FolderScope::AuditedBy(id) => (
                "EXISTS (SELECT 1 FROM projects p \
                         JOIN project_auditors pa ON pa.project_id = p.id \
                         WHERE p.folder_id = f.id AND pa.auditor_id = $1)",
                Some(id),
            ),
        };

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM folders f WHERE {filter}"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))?;

        let folders = sqlx::query_as::<_, Folder>(&format!(
            "SELECT f.* FROM folders f WHERE {filter} \
             ORDER BY f.start_date DESC, f.name ASC LIMIT $2 OFFSET $3"
        ))
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))?;

        Ok(PageResponse::new(
            folders,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_id, created_by, is_root, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.created_by)
        .bind(data.is_root)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create folder", PERIOD_CONFLICT))
    }

    /// Apply a partial update. Absent fields keep their stored value.
    pub async fn update(&self, id: Uuid, data: &UpdateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = COALESCE($2, name), \
                                owner_id = COALESCE($3, owner_id), \
                                is_root = COALESCE($4, is_root), \
                                start_date = COALESCE($5, start_date), \
                                end_date = COALESCE($6, end_date), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.is_root)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update folder", PERIOD_CONFLICT))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// Delete a folder by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to delete folder", &[]))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the documents stored in a folder.
    pub async fn count_documents(&self, folder_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE folder_id = $1")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count folder documents", e)
            })?;
        Ok(count as u64)
    }

    /// Whether a project is linked to the folder.
    pub async fn has_project(&self, folder_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM projects WHERE folder_id = $1)")
            .bind(folder_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check folder project", e)
            })
    }

    /// Count the folders a user owns.
    pub async fn count_owned_by(&self, owner_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count owned folders", e)
            })?;
        Ok(count as u64)
    }

    /// Whether `user_id` is an auditor on the folder's project.
    pub async fn is_project_auditor(&self, folder_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM projects p \
                            JOIN project_auditors pa ON pa.project_id = p.id \
                            WHERE p.folder_id = $1 AND pa.auditor_id = $2)",
        )
        .bind(folder_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check project auditor", e)
        })
    }
}
