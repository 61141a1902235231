//! Document handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use auditvault_core::types::pagination::PageResponse;
use auditvault_service::document::{DocumentView, DownloadLink};

use crate::dto::request::DocumentFilter;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/documents?folder_id=...
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<DocumentFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<DocumentView>>>, ApiError> {
    let documents = state
        .document_service
        .list(&auth, filter.folder_id, &params.page_request())
        .await?;
    Ok(Json(ApiResponse::ok(documents)))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentView>>, ApiError> {
    let document = state.document_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(document)))
}

/// GET /api/documents/{id}/download
pub async fn download_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DownloadLink>>, ApiError> {
    let link = state.document_service.download(&auth, id).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.document_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Document deleted"))))
}
