//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user.
///
/// Rows are loaded joined with `roles` so the role code is available
/// without a second query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Login email, stored lower-cased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role code resolved from `roles`.
    pub role: UserRole,
    /// Company the user belongs to (clients and auditors).
    pub company: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if this user has admin privileges.
    pub fn is_surveyor(&self) -> bool {
        self.role.is_surveyor()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub role: UserRole,
    pub company: Option<String>,
}

/// Partial update of a user. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Pre-hashed replacement password.
    pub password_hash: Option<String>,
    pub company: Option<String>,
}
