//! Repository implementations for all AuditVault entities.

pub mod document;
pub mod folder;
pub mod project;
pub mod role;
pub mod user;

pub use document::DocumentRepository;
pub use folder::{FolderRepository, FolderScope};
pub use project::ProjectRepository;
pub use role::RoleRepository;
pub use user::UserRepository;

use auditvault_core::error::{AppError, ErrorKind};

/// Map a write failure, turning known constraint violations into conflicts.
///
/// `constraints` pairs a constraint name with the message to report.
pub(crate) fn map_write_error(
    err: sqlx::Error,
    context: &str,
    constraints: &[(&str, &str)],
) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(name) = db_err.constraint() {
            if let Some((_, message)) = constraints.iter().find(|(c, _)| *c == name) {
                return AppError::conflict(*message);
            }
        }
        if db_err.is_foreign_key_violation() {
            return AppError::conflict(format!("{context}: row is still referenced"));
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), err)
}
