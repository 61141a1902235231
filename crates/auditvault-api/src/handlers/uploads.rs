//! Upload handlers: presign, complete, and stateless chunk upload.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;
use validator::Validate;

use auditvault_core::error::AppError;
use auditvault_service::document::DocumentView;
use auditvault_service::upload::{ChunkOutcome, ChunkUpload, PresignedUpload};

use crate::dto::request::{CompleteUploadBody, PresignUploadBody};
use crate::dto::response::ApiResponse;
use crate::error::{ApiError, validation_error};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/uploads/presign
pub async fn presign_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PresignUploadBody>,
) -> Result<Json<ApiResponse<PresignedUpload>>, ApiError> {
    req.validate().map_err(validation_error)?;
    let upload = state.upload_service.presign(&auth, req.into()).await?;
    Ok(Json(ApiResponse::ok(upload)))
}

/// POST /api/uploads/complete
pub async fn complete_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CompleteUploadBody>,
) -> Result<(StatusCode, Json<ApiResponse<DocumentView>>), ApiError> {
    req.validate().map_err(validation_error)?;
    let document = state.upload_service.complete(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(document))))
}

/// POST /api/uploads/chunk (multipart)
///
/// Fields: `folder_id`, `file_name`, `chunk_index`, `total_chunks`, `file`.
pub async fn upload_chunk(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ChunkOutcome>>), ApiError> {
    let upload = read_chunk(multipart).await?;
    let outcome = state.upload_service.chunk(&auth, upload).await?;
    let status = match outcome {
        ChunkOutcome::Accepted { .. } => StatusCode::ACCEPTED,
        ChunkOutcome::Completed { .. } => StatusCode::CREATED,
    };
    Ok((status, Json(ApiResponse::ok(outcome))))
}

async fn read_chunk(mut multipart: Multipart) -> Result<ChunkUpload, AppError> {
    let mut folder_id = None;
    let mut file_name = None;
    let mut chunk_index = None;
    let mut total_chunks = None;
    let mut content_type = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if file_name.is_none() {
                    file_name = field.file_name().map(str::to_string);
                }
                content_type = field.content_type().map(str::to_string);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read chunk data: {e}"))
                })?);
            }
            "folder_id" => {
                let text = field_text(field).await?;
                folder_id = Some(
                    Uuid::parse_str(text.trim())
                        .map_err(|_| AppError::validation("folder_id must be a UUID"))?,
                );
            }
            "file_name" => file_name = Some(field_text(field).await?),
            "chunk_index" => {
                chunk_index = Some(parse_number(&field_text(field).await?, "chunk_index")?);
            }
            "total_chunks" => {
                total_chunks = Some(parse_number(&field_text(field).await?, "total_chunks")?);
            }
            _ => {}
        }
    }

    Ok(ChunkUpload {
        folder_id: folder_id.ok_or_else(|| AppError::validation("folder_id is required"))?,
        file_name: file_name.ok_or_else(|| AppError::validation("file_name is required"))?,
        chunk_index: chunk_index.unwrap_or(0),
        total_chunks: total_chunks.unwrap_or(1),
        content_type,
        data: data.ok_or_else(|| AppError::validation("file is required"))?,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Malformed multipart field: {e}")))
}

fn parse_number(text: &str, field: &str) -> Result<u32, AppError> {
    text.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("{field} must be a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 3 ", "chunk_index").unwrap(), 3);
        let err = parse_number("-1", "chunk_index").unwrap_err();
        assert!(err.message.contains("chunk_index"));
    }
}
