//! Client management handlers (surveyor only).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use auditvault_core::types::pagination::PageResponse;
use auditvault_entity::user::User;

use crate::dto::request::{CreateMemberBody, UpdateMemberBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::{ApiError, validation_error};
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/clients
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<User>>>, ApiError> {
    let clients = state
        .client_service
        .list(&auth, params.search.as_deref(), &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(clients)))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateMemberBody>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    req.validate().map_err(validation_error)?;
    let client = state.client_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(client))))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let client = state.client_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(client)))
}

/// PATCH /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMemberBody>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    req.validate().map_err(validation_error)?;
    let client = state.client_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(client)))
}

/// DELETE /api/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.client_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Client deleted"))))
}
