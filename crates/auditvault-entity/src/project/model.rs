//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Links one folder to the auditors allowed to read its documents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// The folder under audit. At most one project per folder.
    pub folder_id: Uuid,
    /// The surveyor who created the project.
    pub created_by: Uuid,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A project with its folder name and the ids of its auditors.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    /// Name of the linked folder.
    pub folder_name: String,
    /// Auditors assigned to the project.
    pub auditor_ids: Vec<Uuid>,
}

impl ProjectDetail {
    /// Whether `user_id` is one of the project's auditors.
    pub fn has_auditor(&self, user_id: Uuid) -> bool {
        self.auditor_ids.contains(&user_id)
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub folder_id: Uuid,
    pub created_by: Uuid,
    pub auditor_ids: Vec<Uuid>,
}
