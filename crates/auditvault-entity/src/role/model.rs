//! Role entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::user::UserRole;

/// A row of the `roles` lookup table.
///
/// The initial migration seeds exactly one row per [`UserRole`] variant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Surrogate key referenced by `users.role_id`.
    pub id: i16,
    /// Machine code of the role.
    pub code: UserRole,
    /// Label shown to people.
    pub display_name: String,
}
