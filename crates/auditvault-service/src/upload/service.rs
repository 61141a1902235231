//! Upload service.
//!
//! Two flows end in a document row. The presigned flow hands the client a
//! PUT URL for a generated key and records the document once the client
//! reports completion. The chunked flow receives bytes directly; each chunk
//! request stands alone and only the final one is stored.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use auditvault_auth::rbac::RbacEnforcer;
use auditvault_core::error::AppError;
use auditvault_core::traits::storage::ObjectStore;
use auditvault_database::repositories::DocumentRepository;
use auditvault_entity::document::CreateDocument;
use auditvault_entity::user::UserRole;
use auditvault_storage::chunked::ChunkDescriptor;
use auditvault_storage::key::ObjectKey;

use crate::context::RequestContext;
use crate::document::DocumentView;
use crate::folder::FolderService;

/// Request for a presigned upload URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignUploadRequest {
    pub folder_id: Uuid,
    pub file_name: String,
    /// Defaults to a type guessed from the extension.
    pub content_type: Option<String>,
}

/// A presigned PUT the client performs itself.
#[derive(Debug, Clone, Serialize)]
pub struct PresignedUpload {
    pub key: String,
    pub url: String,
    pub method: String,
    pub content_type: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Report that a presigned PUT finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteUploadRequest {
    pub folder_id: Uuid,
    pub key: String,
}

/// One chunk of a chunked upload.
#[derive(Debug, Clone)]
pub struct ChunkUpload {
    pub folder_id: Uuid,
    pub file_name: String,
    pub chunk_index: u32,
    pub total_chunks: u32,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Result of handling a chunk.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChunkOutcome {
    /// A non-final chunk; nothing was stored.
    Accepted { chunk_index: u32, total_chunks: u32 },
    /// The final chunk was stored and the document recorded.
    Completed { document: DocumentView },
}

/// Handles document uploads into folders.
#[derive(Debug, Clone)]
pub struct UploadService {
    folders: Arc<FolderService>,
    document_repo: Arc<DocumentRepository>,
    store: Arc<dyn ObjectStore>,
    company: String,
    upload_expiry: Duration,
    max_chunk_bytes: usize,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        folders: Arc<FolderService>,
        document_repo: Arc<DocumentRepository>,
        store: Arc<dyn ObjectStore>,
        company: String,
        upload_expiry: Duration,
        max_chunk_bytes: usize,
    ) -> Self {
        Self {
            folders,
            document_repo,
            store,
            company,
            upload_expiry,
            max_chunk_bytes,
        }
    }

    /// Only surveyors and folder owners may upload.
    async fn require_upload(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        RbacEnforcer::require_any(ctx.role, &[UserRole::Surveyor, UserRole::Client])?;
        let (_, access) = self.folders.load(ctx, folder_id).await?;
        access.require_upload()
    }

    async fn new_key(&self, folder_id: Uuid, file_name: &str) -> Result<ObjectKey, AppError> {
        if file_name.trim().is_empty() {
            return Err(AppError::validation("file_name cannot be empty"));
        }
        unused_key(
            self.store.as_ref(),
            &self.company,
            folder_id,
            file_name,
            Utc::now().timestamp_millis(),
        )
        .await
    }

    /// Generate a key and presign a PUT for it.
    pub async fn presign(
        &self,
        ctx: &RequestContext,
        req: PresignUploadRequest,
    ) -> Result<PresignedUpload, AppError> {
        self.require_upload(ctx, req.folder_id).await?;

        let key = self.new_key(req.folder_id, &req.file_name).await?;
        let content_type = req
            .content_type
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| key.content_type().to_string());

        let signed = self
            .store
            .presign_put(&key.to_string(), &content_type, self.upload_expiry)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            folder_id = %req.folder_id,
            key = %signed.key,
            "Upload presigned"
        );

        Ok(PresignedUpload {
            key: signed.key,
            url: signed.url,
            method: signed.method,
            content_type,
            expires_in: signed.expires_in,
            expires_at: signed.expires_at,
        })
    }

    /// Record a document for a key previously handed out by [`Self::presign`].
    pub async fn complete(
        &self,
        ctx: &RequestContext,
        req: CompleteUploadRequest,
    ) -> Result<DocumentView, AppError> {
        self.require_upload(ctx, req.folder_id).await?;

        let key = ObjectKey::parse(&req.key)?;
        if key.folder_id != req.folder_id
            || !req
                .key
                .starts_with(&ObjectKey::folder_prefix(&self.company, req.folder_id))
        {
            return Err(AppError::validation("Key does not belong to this folder"));
        }
        if !self.store.exists(&req.key).await? {
            return Err(AppError::validation(
                "No object has been uploaded under this key",
            ));
        }

        self.record(ctx, req.folder_id, req.key).await
    }

    /// Handle one chunk. Non-final chunks are acknowledged and dropped.
    pub async fn chunk(
        &self,
        ctx: &RequestContext,
        upload: ChunkUpload,
    ) -> Result<ChunkOutcome, AppError> {
        let descriptor = ChunkDescriptor::new(upload.chunk_index, upload.total_chunks)?;
        self.require_upload(ctx, upload.folder_id).await?;

        if upload.data.len() > self.max_chunk_bytes {
            return Err(AppError::validation(format!(
                "Chunk of {} bytes exceeds the {} byte limit",
                upload.data.len(),
                self.max_chunk_bytes
            )));
        }

        if !descriptor.is_final() {
            debug!(
                user_id = %ctx.user_id,
                folder_id = %upload.folder_id,
                chunk_index = descriptor.index,
                total_chunks = descriptor.total,
                "Non-final chunk acknowledged"
            );
            return Ok(ChunkOutcome::Accepted {
                chunk_index: descriptor.index,
                total_chunks: descriptor.total,
            });
        }

        let key = self.new_key(upload.folder_id, &upload.file_name).await?;
        let content_type = upload
            .content_type
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| key.content_type().to_string());
        let key = key.to_string();

        self.store.put(&key, upload.data, &content_type).await?;
        let document = self.record(ctx, upload.folder_id, key).await?;
        Ok(ChunkOutcome::Completed { document })
    }

    async fn record(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        key: String,
    ) -> Result<DocumentView, AppError> {
        let document = self
            .document_repo
            .create(&CreateDocument {
                url: key,
                folder_id,
                uploaded_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            document_id = %document.id,
            key = %document.url,
            "Document uploaded"
        );
        Ok(DocumentView::from(document))
    }
}

/// Attempts made before giving up on a free key.
const KEY_ATTEMPTS: i64 = 16;

/// First key at or after `timestamp_ms` with no object behind it.
///
/// Same-named uploads into one folder within a millisecond would otherwise
/// share a key, and the second put would replace the first document's bytes.
async fn unused_key(
    store: &dyn ObjectStore,
    company: &str,
    folder_id: Uuid,
    file_name: &str,
    timestamp_ms: i64,
) -> Result<ObjectKey, AppError> {
    for offset in 0..KEY_ATTEMPTS {
        let key = ObjectKey::generate(company, folder_id, file_name, timestamp_ms + offset);
        if !store.exists(&key.to_string()).await? {
            return Ok(key);
        }
    }
    Err(AppError::conflict(
        "Too many concurrent uploads of this file; retry shortly",
    ))
}

#[cfg(test)]
mod tests {
    use auditvault_storage::MemoryObjectStore;

    use super::*;

    const TS: i64 = 1_767_225_600_000;

    #[tokio::test]
    async fn test_unused_key_keeps_timestamp_when_free() {
        let store = MemoryObjectStore::new("audits");
        let folder = Uuid::new_v4();
        let key = unused_key(&store, "Acme", folder, "Report.pdf", TS).await.unwrap();
        assert_eq!(key, ObjectKey::generate("Acme", folder, "Report.pdf", TS));
    }

    #[tokio::test]
    async fn test_unused_key_skips_taken_timestamp() {
        let store = MemoryObjectStore::new("audits");
        let folder = Uuid::new_v4();
        let taken = ObjectKey::generate("Acme", folder, "Report.pdf", TS).to_string();
        store
            .put(&taken, Bytes::from_static(b"first"), "application/pdf")
            .await
            .unwrap();

        let key = unused_key(&store, "Acme", folder, "Report.pdf", TS).await.unwrap();
        assert_ne!(key.to_string(), taken);
        assert_eq!(key.timestamp_ms, TS + 1);
        assert_eq!(store.get(&taken).await.unwrap().data, Bytes::from_static(b"first"));
    }

    #[tokio::test]
    async fn test_unused_key_gives_up_with_conflict() {
        let store = MemoryObjectStore::new("audits");
        let folder = Uuid::new_v4();
        for offset in 0..KEY_ATTEMPTS {
            let key = ObjectKey::generate("Acme", folder, "a.pdf", TS + offset).to_string();
            store.put(&key, Bytes::new(), "application/pdf").await.unwrap();
        }
        let err = unused_key(&store, "Acme", folder, "a.pdf", TS).await.unwrap_err();
        assert_eq!(err.kind, auditvault_core::error::ErrorKind::Conflict);
    }
}
