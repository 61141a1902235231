//! Project service. Projects link one folder to the auditors reviewing it.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use auditvault_auth::rbac::RbacEnforcer;
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::{FolderRepository, ProjectRepository, UserRepository};
use auditvault_entity::project::{CreateProject, ProjectDetail};
use auditvault_entity::user::UserRole;

use crate::context::RequestContext;

/// Request to create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub folder_id: Uuid,
    #[serde(default)]
    pub auditor_ids: Vec<Uuid>,
}

/// Project update. A present `auditor_ids` replaces the whole set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub auditor_ids: Option<Vec<Uuid>>,
}

/// Manages projects (surveyor only; auditors may read their own).
#[derive(Debug, Clone)]
pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        project_repo: Arc<ProjectRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            project_repo,
            folder_repo,
            user_repo,
        }
    }

    /// All projects for surveyors; assigned projects for auditors.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<ProjectDetail>, AppError> {
        RbacEnforcer::require_any(ctx.role, &[UserRole::Surveyor, UserRole::Auditor])?;
        let auditor = (ctx.role == UserRole::Auditor).then_some(ctx.user_id);
        self.project_repo.find_all(auditor, page).await
    }

    pub async fn get(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
    ) -> Result<ProjectDetail, AppError> {
        RbacEnforcer::require_any(ctx.role, &[UserRole::Surveyor, UserRole::Auditor])?;
        let project = self.find(project_id).await?;
        if ctx.role == UserRole::Auditor && !project.has_auditor(ctx.user_id) {
            return Err(AppError::authorization(
                "You are not assigned to this project",
            ));
        }
        Ok(project)
    }

    /// Create a project for a folder that does not have one yet.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateProjectRequest,
    ) -> Result<ProjectDetail, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;

        if self.folder_repo.find_by_id(req.folder_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                req.folder_id
            )));
        }
        let auditor_ids = self.resolve_auditors(&req.auditor_ids).await?;

        let project = self
            .project_repo
            .create(&CreateProject {
                folder_id: req.folder_id,
                created_by: ctx.user_id,
                auditor_ids,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            project_id = %project.project.id,
            folder_id = %req.folder_id,
            auditors = project.auditor_ids.len(),
            "Project created"
        );
        Ok(project)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        project_id: Uuid,
        req: UpdateProjectRequest,
    ) -> Result<ProjectDetail, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;

        let Some(requested) = req.auditor_ids else {
            return self.find(project_id).await;
        };
        let auditor_ids = self.resolve_auditors(&requested).await?;
        let project = self
            .project_repo
            .replace_auditors(project_id, &auditor_ids)
            .await?;

        info!(
            user_id = %ctx.user_id,
            project_id = %project_id,
            auditors = project.auditor_ids.len(),
            "Project auditors replaced"
        );
        Ok(project)
    }

    pub async fn delete(&self, ctx: &RequestContext, project_id: Uuid) -> Result<(), AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        if !self.project_repo.delete(project_id).await? {
            return Err(AppError::not_found(format!("Project {project_id} not found")));
        }
        info!(user_id = %ctx.user_id, project_id = %project_id, "Project deleted");
        Ok(())
    }

    async fn find(&self, project_id: Uuid) -> Result<ProjectDetail, AppError> {
        self.project_repo
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {project_id} not found")))
    }

    /// Deduplicate `ids` and check every one names an auditor.
    async fn resolve_auditors(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        let wanted: Vec<Uuid> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if wanted.is_empty() {
            return Ok(wanted);
        }

        let found: BTreeSet<Uuid> = self
            .user_repo
            .filter_ids_by_role(&wanted, UserRole::Auditor)
            .await?
            .into_iter()
            .collect();

        let unknown: Vec<String> = wanted
            .iter()
            .filter(|id| !found.contains(id))
            .map(Uuid::to_string)
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::validation(format!(
                "Not auditors: {}",
                unknown.join(", ")
            )));
        }
        Ok(wanted)
    }
}
