//! Folder CRUD with ownership checks and deletion guards.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use auditvault_auth::policy::FolderAccess;
use auditvault_auth::rbac::RbacEnforcer;
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::{
    DocumentRepository, FolderRepository, FolderScope, UserRepository,
};
use auditvault_entity::folder::{CreateFolder, Folder, UpdateFolder};
use auditvault_entity::user::UserRole;

use crate::context::RequestContext;
use crate::document::DocumentView;

/// Request to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
    /// Owner of the folder. Clients may only name themselves; defaults to
    /// the caller.
    pub owner_id: Option<Uuid>,
    #[serde(default)]
    pub is_root: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial folder update. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub is_root: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Manages folders and their audit periods.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
    document_repo: Arc<DocumentRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        document_repo: Arc<DocumentRepository>,
    ) -> Self {
        Self {
            folder_repo,
            user_repo,
            document_repo,
        }
    }

    /// Folders visible to the caller: all for surveyors, owned for
    /// clients, audited for auditors.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Folder>, AppError> {
        let scope = match ctx.role {
            UserRole::Surveyor => FolderScope::All,
            UserRole::Client => FolderScope::OwnedBy(ctx.user_id),
            UserRole::Auditor => FolderScope::AuditedBy(ctx.user_id),
        };
        self.folder_repo.find_scoped(scope, page).await
    }

    /// Load a folder and compute the caller's access to it.
    pub async fn load(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(Folder, FolderAccess), AppError> {
        let folder = self
            .folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))?;

        let is_project_auditor = ctx.role == UserRole::Auditor
            && self
                .folder_repo
                .is_project_auditor(folder_id, ctx.user_id)
                .await?;

        let access =
            FolderAccess::resolve(ctx.user_id, ctx.role, folder.owner_id, is_project_auditor);
        Ok((folder, access))
    }

    pub async fn get(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<Folder, AppError> {
        let (folder, access) = self.load(ctx, folder_id).await?;
        access.require_view()?;
        Ok(folder)
    }

    /// Create a folder. Auditors cannot create folders.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        RbacEnforcer::require_any(ctx.role, &[UserRole::Surveyor, UserRole::Client])?;

        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        Folder::validate_period(req.start_date, req.end_date)?;

        let owner_id = req.owner_id.unwrap_or(ctx.user_id);
        if owner_id != ctx.user_id {
            if !ctx.is_surveyor() {
                return Err(AppError::authorization(
                    "Clients can only create folders they own",
                ));
            }
            self.require_folder_owner(owner_id).await?;
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name: name.to_string(),
                owner_id,
                created_by: ctx.user_id,
                is_root: req.is_root,
                start_date: req.start_date,
                end_date: req.end_date,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            owner_id = %owner_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Apply a partial update. The resulting period is validated against
    /// whichever dates are not being changed.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        req: UpdateFolderRequest,
    ) -> Result<Folder, AppError> {
        let (folder, access) = self.load(ctx, folder_id).await?;
        access.require_manage()?;

        let name = match req.name.as_deref().map(str::trim) {
            Some("") => return Err(AppError::validation("Folder name cannot be empty")),
            other => other.map(str::to_string),
        };

        Folder::validate_period(
            req.start_date.unwrap_or(folder.start_date),
            req.end_date.unwrap_or(folder.end_date),
        )?;

        if let Some(owner_id) = req.owner_id.filter(|id| *id != folder.owner_id) {
            RbacEnforcer::require_surveyor(ctx.role)?;
            self.require_folder_owner(owner_id).await?;
        }

        let updated = self
            .folder_repo
            .update(
                folder_id,
                &UpdateFolder {
                    name,
                    owner_id: req.owner_id,
                    is_root: req.is_root,
                    start_date: req.start_date,
                    end_date: req.end_date,
                },
            )
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder updated");
        Ok(updated)
    }

    /// Delete an empty folder that has no project.
    pub async fn delete(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        let (_, access) = self.load(ctx, folder_id).await?;
        access.require_manage()?;

        let documents = self.folder_repo.count_documents(folder_id).await?;
        if documents > 0 {
            return Err(AppError::conflict(format!(
                "Folder still contains {documents} document(s)"
            )));
        }
        if self.folder_repo.has_project(folder_id).await? {
            return Err(AppError::conflict(
                "Folder is linked to a project; delete the project first",
            ));
        }

        if !self.folder_repo.delete(folder_id).await? {
            return Err(AppError::not_found(format!("Folder {folder_id} not found")));
        }

        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder deleted");
        Ok(())
    }

    /// Documents of a folder that the caller may access.
    pub async fn documents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<DocumentView>, AppError> {
        let (_, access) = self.load(ctx, folder_id).await?;
        access.require_view()?;

        let documents = self
            .document_repo
            .find_accessible(ctx.user_id, Some(folder_id), page)
            .await?;
        Ok(documents.map(DocumentView::from))
    }

    async fn require_folder_owner(&self, owner_id: Uuid) -> Result<(), AppError> {
        let owner = self
            .user_repo
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Owner {owner_id} does not exist")))?;
        if !owner.role.can_own_folders() {
            return Err(AppError::validation(format!(
                "A {} cannot own folders",
                owner.role.display_name()
            )));
        }
        Ok(())
    }
}
