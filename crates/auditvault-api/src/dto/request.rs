//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use auditvault_service::folder::{CreateFolderRequest, UpdateFolderRequest};
use auditvault_service::project::{CreateProjectRequest, UpdateProjectRequest};
use auditvault_service::upload::{CompleteUploadRequest, PresignUploadRequest};
use auditvault_service::user::{CreateMemberRequest, UpdateMemberRequest};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Create a client or auditor.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMemberBody {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    #[validate(length(max = 200))]
    pub company: Option<String>,
}

impl From<CreateMemberBody> for CreateMemberRequest {
    fn from(body: CreateMemberBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            company: body.company,
        }
    }
}

/// Partial update of a client or auditor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMemberBody {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    pub password: Option<String>,
    #[validate(length(max = 200))]
    pub company: Option<String>,
}

impl From<UpdateMemberBody> for UpdateMemberRequest {
    fn from(body: UpdateMemberBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            password: body.password,
            company: body.company,
        }
    }
}

/// Create a folder.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderBody {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    pub owner_id: Option<Uuid>,
    #[serde(default)]
    pub is_root: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<CreateFolderBody> for CreateFolderRequest {
    fn from(body: CreateFolderBody) -> Self {
        Self {
            name: body.name,
            owner_id: body.owner_id,
            is_root: body.is_root,
            start_date: body.start_date,
            end_date: body.end_date,
        }
    }
}

/// Partial folder update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFolderBody {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    pub owner_id: Option<Uuid>,
    pub is_root: Option<bool>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateFolderBody> for UpdateFolderRequest {
    fn from(body: UpdateFolderBody) -> Self {
        Self {
            name: body.name,
            owner_id: body.owner_id,
            is_root: body.is_root,
            start_date: body.start_date,
            end_date: body.end_date,
        }
    }
}

/// Create a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectBody {
    pub folder_id: Uuid,
    #[serde(default)]
    pub auditor_ids: Vec<Uuid>,
}

impl From<CreateProjectBody> for CreateProjectRequest {
    fn from(body: CreateProjectBody) -> Self {
        Self {
            folder_id: body.folder_id,
            auditor_ids: body.auditor_ids,
        }
    }
}

/// Project update; `auditor_ids` replaces the set when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectBody {
    pub auditor_ids: Option<Vec<Uuid>>,
}

impl From<UpdateProjectBody> for UpdateProjectRequest {
    fn from(body: UpdateProjectBody) -> Self {
        Self {
            auditor_ids: body.auditor_ids,
        }
    }
}

/// Ask for a presigned upload URL.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresignUploadBody {
    pub folder_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub file_name: String,
    #[validate(length(max = 255))]
    pub content_type: Option<String>,
}

impl From<PresignUploadBody> for PresignUploadRequest {
    fn from(body: PresignUploadBody) -> Self {
        Self {
            folder_id: body.folder_id,
            file_name: body.file_name,
            content_type: body.content_type,
        }
    }
}

/// Report a finished presigned upload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteUploadBody {
    pub folder_id: Uuid,
    #[validate(length(min = 1, max = 1024, message = "must be 1-1024 characters"))]
    pub key: String,
}

impl From<CompleteUploadBody> for CompleteUploadRequest {
    fn from(body: CompleteUploadBody) -> Self {
        Self {
            folder_id: body.folder_id,
            key: body.key,
        }
    }
}

/// Filters for `GET /api/documents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub folder_id: Option<Uuid>,
}
