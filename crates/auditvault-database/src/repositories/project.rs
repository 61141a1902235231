//! Project repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_entity::project::{CreateProject, ProjectDetail};

use super::map_write_error;

/// Select clause producing a [`ProjectDetail`]; callers append a `WHERE`.
const DETAIL_SELECT: &str = "SELECT p.id, p.folder_id, p.created_by, p.created_at, p.updated_at, \
            f.name AS folder_name, \
            COALESCE(array_agg(pa.auditor_id) FILTER (WHERE pa.auditor_id IS NOT NULL), '{}') \
                AS auditor_ids \
     FROM projects p \
     JOIN folders f ON f.id = p.folder_id \
     LEFT JOIN project_auditors pa ON pa.project_id = p.id";

const DETAIL_GROUP: &str = "GROUP BY p.id, f.name";

const FOLDER_CONFLICT: &[(&str, &str)] = &[(
    "projects_folder_id_key",
    "The folder already has a project",
)];

/// Repository for projects and their auditor assignments.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project with its auditors.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProjectDetail>> {
        sqlx::query_as::<_, ProjectDetail>(&format!(
            "{DETAIL_SELECT} WHERE p.id = $1 {DETAIL_GROUP}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List projects, optionally only those an auditor is assigned to.
    pub async fn find_all(
        &self,
        auditor_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<ProjectDetail>> {
        let filter = "($1::UUID IS NULL OR p.id IN \
                      (SELECT project_id FROM project_auditors WHERE auditor_id = $1))";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM projects p WHERE {filter}"))
                .bind(auditor_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count projects", e)
                })?;

        let projects = sqlx::query_as::<_, ProjectDetail>(&format!(
            "{DETAIL_SELECT} WHERE {filter} {DETAIL_GROUP} \
             ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
        ))
        .bind(auditor_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))?;

        Ok(PageResponse::new(
            projects,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a project and its auditor assignments in one transaction.
    pub async fn create(&self, data: &CreateProject) -> AppResult<ProjectDetail> {
        let id = Uuid::now_v7();
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("INSERT INTO projects (id, folder_id, created_by) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(data.folder_id)
            .bind(data.created_by)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "Failed to create project", FOLDER_CONFLICT))?;

        sqlx::query(
            "INSERT INTO project_auditors (project_id, auditor_id) \
             SELECT $1, UNNEST($2::UUID[]) ON CONFLICT DO NOTHING",
        )
        .bind(id)
        .bind(&data.auditor_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Failed to assign auditors", &[]))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit project", e)
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Project {id} vanished after insert")))
    }

    /// Replace the auditor set of a project.
    pub async fn replace_auditors(
        &self,
        project_id: Uuid,
        auditor_ids: &[Uuid],
    ) -> AppResult<ProjectDetail> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let touched = sqlx::query("UPDATE projects SET updated_at = NOW() WHERE id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))?;
        if touched.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Project {project_id} not found")));
        }

        sqlx::query("DELETE FROM project_auditors WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear auditors", e)
            })?;

        sqlx::query(
            "INSERT INTO project_auditors (project_id, auditor_id) \
             SELECT $1, UNNEST($2::UUID[]) ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(auditor_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Failed to assign auditors", &[]))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit project", e)
        })?;

        self.find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))
    }

    /// Delete a project. Auditor assignments cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to delete project", &[]))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the projects an auditor is assigned to.
    pub async fn count_for_auditor(&self, auditor_id: Uuid) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM project_auditors WHERE auditor_id = $1")
                .bind(auditor_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to count auditor projects",
                        e,
                    )
                })?;
        Ok(count as u64)
    }
}
