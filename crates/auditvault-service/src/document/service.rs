//! Document service. Every single-document operation goes through
//! [`DocumentAccessPolicy`].

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use auditvault_auth::policy::{AccessGrant, DocumentAccessContext, DocumentAccessPolicy};
use auditvault_core::error::AppError;
use auditvault_core::traits::storage::ObjectStore;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::DocumentRepository;
use auditvault_entity::document::DocumentWithAccess;

use super::view::DocumentView;
use crate::context::RequestContext;

/// A presigned download link for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadLink {
    pub document_id: Uuid,
    pub name: String,
    pub url: String,
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Lists, reads, downloads, and deletes documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    document_repo: Arc<DocumentRepository>,
    store: Arc<dyn ObjectStore>,
    download_expiry: Duration,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        store: Arc<dyn ObjectStore>,
        download_expiry: Duration,
    ) -> Self {
        Self {
            document_repo,
            store,
            download_expiry,
        }
    }

    /// Documents the user may access, optionally within one folder.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<DocumentView>, AppError> {
        let documents = self
            .document_repo
            .find_accessible(ctx.user_id, folder_id, page)
            .await?;
        Ok(documents.map(DocumentView::from))
    }

    /// Load a document and authorize the caller.
    async fn authorized(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<(DocumentWithAccess, AccessGrant), AppError> {
        let row = self
            .document_repo
            .find_with_access(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;
        let grant = DocumentAccessPolicy::authorize(ctx.user_id, &DocumentAccessContext::from(&row))?;
        Ok((row, grant))
    }

    pub async fn get(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<DocumentView, AppError> {
        let (row, _) = self.authorized(ctx, document_id).await?;
        Ok(DocumentView::from(row.document))
    }

    /// Presign a GET for the document's object.
    pub async fn download(
        &self,
        ctx: &RequestContext,
        document_id: Uuid,
    ) -> Result<DownloadLink, AppError> {
        let (row, grant) = self.authorized(ctx, document_id).await?;
        let view = DocumentView::from(row.document);
        let signed = self
            .store
            .presign_get(&view.document.url, self.download_expiry)
            .await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            grant = ?grant,
            "Download link issued"
        );

        Ok(DownloadLink {
            document_id,
            name: view.name,
            url: signed.url,
            expires_in: signed.expires_in,
            expires_at: signed.expires_at,
        })
    }

    /// Delete the object and its row.
    ///
    /// A failed object delete is logged and the row is removed anyway, so a
    /// stale object never keeps a document visible.
    pub async fn delete(&self, ctx: &RequestContext, document_id: Uuid) -> Result<(), AppError> {
        let (row, grant) = self.authorized(ctx, document_id).await?;

        if let Err(e) = self.store.delete(&row.document.url).await {
            warn!(
                document_id = %document_id,
                key = %row.document.url,
                error = %e,
                "Failed to delete object; removing row anyway"
            );
        }
        self.document_repo.delete(document_id).await?;

        info!(
            user_id = %ctx.user_id,
            document_id = %document_id,
            grant = ?grant,
            "Document deleted"
        );
        Ok(())
    }
}
