//! Client management (surveyor only).

use std::sync::Arc;

use uuid::Uuid;

use auditvault_auth::rbac::RbacEnforcer;
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::FolderRepository;
use auditvault_entity::user::User;

use super::directory::{CreateMemberRequest, RoleDirectory, UpdateMemberRequest};
use crate::context::RequestContext;

/// Manages users holding the client role.
#[derive(Debug, Clone)]
pub struct ClientService {
    directory: RoleDirectory,
    folder_repo: Arc<FolderRepository>,
}

impl ClientService {
    /// Creates a new client service.
    pub fn new(directory: RoleDirectory, folder_repo: Arc<FolderRepository>) -> Self {
        Self {
            directory,
            folder_repo,
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

    /// Delete a client. Clients that still own folders are kept.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        RbacEnforcer::require_surveyor(ctx.role)?;
        self.directory.get(id).await?;

        let owned = self.folder_repo.count_owned_by(id).await?;
        if owned > 0 {
            return Err(AppError::conflict(format!(
                "Client owns {owned} folder(s); delete or reassign them first"
            )));
        }

        self.directory.delete(ctx.user_id, id).await
    }
}
