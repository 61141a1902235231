//! RBAC enforcement: checks whether a role may call an operation.

use auditvault_core::error::AppError;
use auditvault_entity::user::UserRole;

/// Enforces role restrictions on system-level operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Require the role to be one of `allowed`.
    pub fn require_any(role: UserRole, allowed: &[UserRole]) -> Result<(), AppError> {
        if allowed.contains(&role) {
            Ok(())
        } else {
            let names: Vec<&str> = allowed.iter().map(UserRole::as_str).collect();
            Err(AppError::authorization(format!(
                "Role '{role}' is not permitted; requires one of: {}",
                names.join(", ")
            )))
        }
    }

    /// Require the surveyor role.
    pub fn require_surveyor(role: UserRole) -> Result<(), AppError> {
        Self::require_any(role, &[UserRole::Surveyor])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surveyor_only() {
        assert!(RbacEnforcer::require_surveyor(UserRole::Surveyor).is_ok());
        assert!(RbacEnforcer::require_surveyor(UserRole::Client).is_err());
        assert!(RbacEnforcer::require_surveyor(UserRole::Auditor).is_err());
    }

    #[test]
    fn test_error_lists_allowed_roles() {
        let err = RbacEnforcer::require_any(UserRole::Auditor, &[UserRole::Surveyor, UserRole::Client])
            .unwrap_err();
        assert!(err.message.contains("surveyor, client"));
    }
}
