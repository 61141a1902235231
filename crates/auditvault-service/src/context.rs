//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use auditvault_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API's auth extractor from verified token claims and passed
/// into service methods so that every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// Email address from the token claims.
    pub email: String,
    /// Display name from the token claims.
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, email: String, name: String) -> Self {
        Self {
            user_id,
            role,
            email,
            name,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is a surveyor.
    pub fn is_surveyor(&self) -> bool {
        self.role.is_surveyor()
    }
}
