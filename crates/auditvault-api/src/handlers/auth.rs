//! Login and current-user handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use auditvault_entity::user::User;
use auditvault_service::auth::LoginResponse;

use crate::dto::request::LoginRequest;
use crate::dto::response::ApiResponse;
use crate::error::{ApiError, validation_error};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate().map_err(validation_error)?;
    let response = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(ApiResponse::ok(response)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.auth_service.me(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
