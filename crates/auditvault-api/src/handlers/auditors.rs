//! Auditor management handlers (surveyor only).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use auditvault_core::types::pagination::PageResponse;
use auditvault_entity::project::ProjectDetail;
use auditvault_entity::user::User;

use crate::dto::request::{CreateMemberBody, UpdateMemberBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::{ApiError, validation_error};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/auditors
pub async fn list_auditors(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let auditors = state
        .auditor_service
        .list(&auth, params.search.as_deref(), &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(auditors)))
}

/// POST /api/auditors
pub async fn create_auditor(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMemberBody>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    req.validate().map_err(validation_error)?;
    let auditor = state.auditor_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(auditor))))
}

/// GET /api/auditors/{id}
pub async fn get_auditor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let auditor = state.auditor_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(auditor)))
}

/// PATCH /api/auditors/{id}
pub async fn update_auditor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMemberBody>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    req.validate().map_err(validation_error)?;
    let auditor = state.auditor_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(auditor)))
}

/// DELETE /api/auditors/{id}
pub async fn delete_auditor(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.auditor_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Auditor deleted"))))
}

/// GET /api/auditors/{id}/projects
pub async fn auditor_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ProjectDetail>>>, ApiError> {
    let projects = state
        .auditor_service
        .projects(&auth, id, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(projects)))
}
