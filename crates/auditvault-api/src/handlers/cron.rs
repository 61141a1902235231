//! Scheduled-cleanup trigger for external cron services.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use auditvault_service::cleanup::CleanupReport;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CronAuth;
use crate::state::AppState;

/// GET|POST /api/cron/cleanup
pub async fn cleanup(
    State(state): State<AppState>,
    _auth: CronAuth,
) -> Result<Json<ApiResponse<CleanupReport>>, ApiError> {
    let report = state.cleanup_service.run(Utc::now()).await?;
    Ok(Json(ApiResponse::ok(report)))
}
