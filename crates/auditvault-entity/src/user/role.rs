//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three roles of the portal.
///
/// Surveyors administer the system. Clients own folders and upload
/// evidence. Auditors read documents of the folders they are assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_code", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrator of the certification body.
    Surveyor,
    /// Audited organization.
    Client,
    /// External reviewer with read access through projects.
    Auditor,
}

impl UserRole {
    /// All roles, in seed order.
    pub const ALL: [UserRole; 3] = [Self::Surveyor, Self::Client, Self::Auditor];

    /// Check if this role is the administrator role.
    pub fn is_surveyor(&self) -> bool {
        matches!(self, Self::Surveyor)
    }

    /// Whether users of this role may own folders.
    pub fn can_own_folders(&self) -> bool {
        matches!(self, Self::Surveyor | Self::Client)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surveyor => "surveyor",
            Self::Client => "client",
            Self::Auditor => "auditor",
        }
    }

    /// Human-readable label matching the seeded `roles.display_name`.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Surveyor => "Surveyor",
            Self::Client => "Client",
            Self::Auditor => "Auditor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = auditvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "surveyor" => Ok(Self::Surveyor),
            "client" => Ok(Self::Client),
            "auditor" => Ok(Self::Auditor),
            _ => Err(auditvault_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: surveyor, client, auditor"
            ))),
        }
    }
}
