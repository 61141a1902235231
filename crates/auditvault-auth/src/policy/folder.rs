//! Folder access rules.

use serde::Serialize;
use uuid::Uuid;

use auditvault_core::error::AppError;
use auditvault_entity::user::UserRole;

/// What a user may do with one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FolderAccess {
    /// See the folder and list the documents visible to the user in it.
    pub can_view: bool,
    /// Rename, re-date, or delete the folder.
    pub can_manage: bool,
    /// Upload documents into the folder.
    pub can_upload: bool,
}

impl FolderAccess {
    /// Compute access for `user_id` holding `role`.
    ///
    /// Surveyors manage every folder. Owners manage their own. Auditors
    /// listed on the folder's project may only view it.
    pub fn resolve(
        user_id: Uuid,
        role: UserRole,
        folder_owner_id: Uuid,
        is_project_auditor: bool,
    ) -> Self {
        let manage = role.is_surveyor() || folder_owner_id == user_id;
        Self {
            can_view: manage || is_project_auditor,
            can_manage: manage,
            can_upload: manage,
        }
    }

    pub fn require_view(&self) -> Result<(), AppError> {
        if self.can_view {
            Ok(())
        } else {
            Err(AppError::authorization("You do not have access to this folder"))
        }
    }

    pub fn require_manage(&self) -> Result<(), AppError> {
        if self.can_manage {
            Ok(())
        } else {
            Err(AppError::authorization("You cannot modify this folder"))
        }
    }

    pub fn require_upload(&self) -> Result<(), AppError> {
        if self.can_upload {
            Ok(())
        } else {
            Err(AppError::authorization("You cannot upload into this folder"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_manages() {
        let owner = Uuid::new_v4();
        let access = FolderAccess::resolve(owner, UserRole::Client, owner, false);
        assert!(access.can_view && access.can_manage && access.can_upload);
    }

    #[test]
    fn test_surveyor_manages_any_folder() {
        let access = FolderAccess::resolve(Uuid::new_v4(), UserRole::Surveyor, Uuid::new_v4(), false);
        assert!(access.require_manage().is_ok());
    }

    #[test]
    fn test_project_auditor_is_read_only() {
        let access = FolderAccess::resolve(Uuid::new_v4(), UserRole::Auditor, Uuid::new_v4(), true);
        assert!(access.require_view().is_ok());
        assert!(access.require_upload().is_err());
        assert!(access.require_manage().is_err());
    }

    #[test]
    fn test_other_client_has_no_access() {
        let access = FolderAccess::resolve(Uuid::new_v4(), UserRole::Client, Uuid::new_v4(), false);
        assert!(access.require_view().is_err());
    }
}
