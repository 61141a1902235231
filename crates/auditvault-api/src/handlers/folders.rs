//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use auditvault_core::types::pagination::PageResponse;
use auditvault_entity::folder::Folder;
use auditvault_service::document::DocumentView;

use crate::dto::request::{CreateFolderBody, UpdateFolderBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::{ApiError, validation_error};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Folder>>>, ApiError> {
    let folders = state
        .folder_service
        .list(&auth, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderBody>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    req.validate().map_err(validation_error)?;
    let folder = state.folder_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state.folder_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PATCH /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderBody>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    req.validate().map_err(validation_error)?;
    let folder = state.folder_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.folder_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Folder deleted"))))
}

/// GET /api/folders/{id}/documents
pub async fn folder_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<DocumentView>>>, ApiError> {
    let documents = state
        .folder_service
        .documents(&auth, id, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(documents)))
}
