//! Document access policy.
//!
//! This is the only place that decides whether a user may read, download,
//! or delete a document. The SQL filter used for document listings in the
//! database crate expresses the same three conditions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use auditvault_core::error::AppError;
use auditvault_entity::document::DocumentWithAccess;

/// Why access to a document was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessGrant {
    /// The requester uploaded the document.
    Uploader,
    /// The requester owns the document's folder.
    FolderOwner,
    /// The requester is an auditor on the folder's project.
    ProjectAuditor,
}

/// The facts about a document the policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAccessContext {
    pub document_id: Uuid,
    pub uploaded_by: Uuid,
    pub folder_owner_id: Uuid,
    pub project_auditor_ids: Vec<Uuid>,
}

impl From<&DocumentWithAccess> for DocumentAccessContext {
    fn from(row: &DocumentWithAccess) -> Self {
        Self {
            document_id: row.document.id,
            uploaded_by: row.document.uploaded_by,
            folder_owner_id: row.folder_owner_id,
            project_auditor_ids: row.project_auditor_ids.clone(),
        }
    }
}

/// Stateless evaluator for document access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAccessPolicy;

impl DocumentAccessPolicy {
    /// Evaluate access without producing an error.
    ///
    /// Grants are checked in order: uploader, folder owner, project auditor.
    pub fn evaluate(user_id: Uuid, ctx: &DocumentAccessContext) -> Option<AccessGrant> {
        if ctx.uploaded_by == user_id {
            Some(AccessGrant::Uploader)
        } else if ctx.folder_owner_id == user_id {
            Some(AccessGrant::FolderOwner)
        } else if ctx.project_auditor_ids.contains(&user_id) {
            Some(AccessGrant::ProjectAuditor)
        } else {
            None
        }
    }

    /// Require access, returning the grant or an authorization error.
    pub fn authorize(user_id: Uuid, ctx: &DocumentAccessContext) -> Result<AccessGrant, AppError> {
        Self::evaluate(user_id, ctx).ok_or_else(|| {
            tracing::debug!(
                user_id = %user_id,
                document_id = %ctx.document_id,
                "Document access denied"
            );
            AppError::authorization("You do not have access to this document")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(uploader: Uuid, owner: Uuid, auditors: Vec<Uuid>) -> DocumentAccessContext {
        DocumentAccessContext {
            document_id: Uuid::new_v4(),
            uploaded_by: uploader,
            folder_owner_id: owner,
            project_auditor_ids: auditors,
        }
    }

    #[test]
    fn test_uploader_has_access() {
        let uploader = Uuid::new_v4();
        let c = ctx(uploader, Uuid::new_v4(), vec![]);
        assert_eq!(
            DocumentAccessPolicy::authorize(uploader, &c).unwrap(),
            AccessGrant::Uploader
        );
    }

    #[test]
    fn test_folder_owner_has_access() {
        let owner = Uuid::new_v4();
        let c = ctx(Uuid::new_v4(), owner, vec![]);
        assert_eq!(
            DocumentAccessPolicy::evaluate(owner, &c),
            Some(AccessGrant::FolderOwner)
        );
    }

    #[test]
    fn test_project_auditor_has_access() {
        let auditor = Uuid::new_v4();
        let c = ctx(Uuid::new_v4(), Uuid::new_v4(), vec![Uuid::new_v4(), auditor]);
        assert_eq!(
            DocumentAccessPolicy::evaluate(auditor, &c),
            Some(AccessGrant::ProjectAuditor)
        );
    }

    #[test]
    fn test_stranger_is_denied() {
        let c = ctx(Uuid::new_v4(), Uuid::new_v4(), vec![Uuid::new_v4()]);
        let err = DocumentAccessPolicy::authorize(Uuid::new_v4(), &c).unwrap_err();
        assert_eq!(err.kind, auditvault_core::error::ErrorKind::Authorization);
    }

    #[test]
    fn test_grant_precedence() {
        let user = Uuid::new_v4();
        let c = ctx(user, user, vec![user]);
        assert_eq!(DocumentAccessPolicy::evaluate(user, &c), Some(AccessGrant::Uploader));

        let c = ctx(Uuid::new_v4(), user, vec![user]);
        assert_eq!(
            DocumentAccessPolicy::evaluate(user, &c),
            Some(AccessGrant::FolderOwner)
        );
    }
}
