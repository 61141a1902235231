//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use auditvault_core::error::{AppError, ErrorKind};
use auditvault_core::result::AppResult;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_entity::user::{CreateUser, UpdateUser, User, UserRole};

use super::map_write_error;

/// Column list shared by every query that materializes a [`User`].
const USER_COLUMNS: &str = "u.id, u.name, u.email, u.password_hash, r.code AS role, \
                            u.company, u.created_at, u.updated_at";

/// Role filter plus an optional `ILIKE` pattern built by [`contains_pattern`].
const ROLE_SEARCH: &str = "r.code = $1 AND ($2::TEXT IS NULL \
                           OR u.name ILIKE $2 ESCAPE '\\' OR u.email ILIKE $2 ESCAPE '\\')";

const EMAIL_CONFLICT: &[(&str, &str)] = &[("users_email_key", "Email already in use")];

/// Repository for user CRUD and role-scoped queries.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by primary key, restricted to one role.
    pub async fn find_by_id_and_role(&self, id: Uuid, role: UserRole) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE u.id = $1 AND r.code = $2"
        ))
        .bind(id)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE LOWER(u.email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by email", e))
    }

    /// List users of one role, optionally filtered by a name/email search.
    ///
    /// Only rows whose role matches `role` are ever returned.
    pub async fn find_by_role(
        &self,
        role: UserRole,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE {ROLE_SEARCH}"
        ))
        .bind(role)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users by role", e)
        })?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE {ROLE_SEARCH} ORDER BY u.name ASC LIMIT $3 OFFSET $4"
        ))
        .bind(role)
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list users by role", e)
        })?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "WITH u AS ( \
                 INSERT INTO users (id, name, email, password_hash, role_id, company) \
                 SELECT $1, $2, LOWER($3), $4, roles.id, $6 FROM roles WHERE roles.code = $5 \
                 RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        ))
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(&data.company)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to create user", EMAIL_CONFLICT))?
        .ok_or_else(|| AppError::internal(format!("Role '{}' is not seeded", data.role)))
    }

    /// Apply a partial update. Absent fields keep their stored value.
    pub async fn update(&self, id: Uuid, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "WITH u AS ( \
                 UPDATE users SET name = COALESCE($2, name), \
                                  email = COALESCE(LOWER($3), email), \
                                  password_hash = COALESCE($4, password_hash), \
                                  company = COALESCE($5, company), \
                                  updated_at = NOW() \
                 WHERE id = $1 RETURNING * \
             ) \
             SELECT {USER_COLUMNS} FROM u JOIN roles r ON r.id = u.role_id"
        ))
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.company)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Failed to update user", EMAIL_CONFLICT))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Delete a user by ID.
    pub async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to delete user", &[]))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count users holding a role.
    pub async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users u JOIN roles r ON r.id = u.role_id WHERE r.code = $1",
        )
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(count as u64)
    }

    /// Return the ids in `ids` that belong to users holding `role`.
    pub async fn filter_ids_by_role(&self, ids: &[Uuid], role: UserRole) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar(
            "SELECT u.id FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE u.id = ANY($1) AND r.code = $2",
        )
        .bind(ids)
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve user ids", e))
    }
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
