//! Auditor management (surveyor only).

use std::sync::Arc;

use uuid::Uuid;

use auditvault_auth::rbac::RbacEnforcer;
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::ProjectRepository;
use auditvault_entity::project::ProjectDetail;
use auditvault_entity::user::User;

use super::directory::{CreateMemberRequest, RoleDirectory, UpdateMemberRequest};
use crate::context::RequestContext;

/// Manages users holding the auditor role.
#[derive(Debug, Clone)]
pub struct AuditorService {
    directory: RoleDirectory,
    project_repo: Arc<ProjectRepository>,
}

impl AuditorService {
    /// Creates a new auditor service.
    pub fn new(directory: RoleDirectory, project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            directory,
            project_repo,
        }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.list(search, page).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<User, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.get(id).await
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateMemberRequest,
    ) -> Result<User, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.create(ctx.user_id, req).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateMemberRequest,
    ) -> Result<User, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.update(ctx.user_id, id, req).await
    }

    /// Delete an auditor. Auditors assigned to any project are kept.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.get(id).await?;

        let projects = self.project_repo.count_for_auditor(id).await?;
        if projects > 0 {
            return Err(AppError::conflict(format!(
                "Auditor is assigned to {projects} project(s); remove them from those projects first"
            )));
        }

        self.directory.delete(ctx.user_id, id).await
    }

    /// Projects the auditor is assigned to.
    pub async fn projects(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<ProjectDetail>, AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.get(id).await?;
        self.project_repo.find_all(Some(id), page).await
    }
}
