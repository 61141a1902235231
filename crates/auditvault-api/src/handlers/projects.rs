//! Project handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use auditvault_core::types::pagination::PageResponse;
use auditvault_entity::project::ProjectDetail;

use crate::dto::request::{CreateProjectBody, UpdateProjectBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ProjectDetail>>>, ApiError> {
    let projects = state
        .project_service
        .list(&auth, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProjectBody>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectDetail>>), ApiError> {
    let project = state.project_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProjectDetail>>, ApiError> {
    let project = state.project_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// PATCH /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectBody>,
) -> Result<Json<ApiResponse<ProjectDetail>>, ApiError> {
    let project = state.project_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.project_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Project deleted"))))
}
