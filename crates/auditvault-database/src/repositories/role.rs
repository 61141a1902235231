//! Role repository implementation.

use sqlx::PgPool;

use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_entity::role::Role;
use auditvault_entity::user::UserRole;

/// Read-only access to the seeded `roles` table.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every role in id order.
    pub async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT id, code, display_name FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    /// Find the row for a role code.
    pub async fn find_by_code(&self, code: UserRole) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT id, code, display_name FROM roles WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }
}
