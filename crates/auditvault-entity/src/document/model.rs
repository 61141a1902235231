//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A file stored in the object store and attached to a folder.
///
/// There is no stored file name: the display name and extension are
/// derived from `url` when the document is presented.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: Uuid,
    /// Object key inside the configured bucket.
    pub url: String,
    /// The folder containing this document.
    pub folder_id: Uuid,
    /// The user who uploaded the document.
    pub uploaded_by: Uuid,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A document together with the facts needed to authorize access to it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DocumentWithAccess {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub document: Document,
    /// Owner of the parent folder.
    pub folder_owner_id: Uuid,
    /// Auditors on the parent folder's project (empty without a project).
    pub project_auditor_ids: Vec<Uuid>,
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    pub url: String,
    pub folder_id: Uuid,
    pub uploaded_by: Uuid,
}
