//! Convenience result type alias for AuditVault.

use crate::error::AppError;

/// A specialized `Result` type for AuditVault operations.
pub type AppResult<T> = Result<T, AppError>;
