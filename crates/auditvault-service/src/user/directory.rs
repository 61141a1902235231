//! CRUD over the users holding one role.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use auditvault_auth::password::{PasswordHasher, PasswordValidator};
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::{PageRequest, PageResponse};
use auditvault_database::repositories::UserRepository;
use auditvault_entity::user::{CreateUser, UpdateUser, User, UserRole};

/// Request to create a client or auditor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company: Option<String>,
}

/// Partial update of a client or auditor. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub company: Option<String>,
}

/// Users of a single role. Lookups for an id holding another role
/// report "not found" so one role's endpoints never expose another's rows.
#[derive(Debug, Clone)]
pub struct RoleDirectory {
    role: UserRole,
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl RoleDirectory {
    pub fn new(
        role: UserRole,
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            role,
            user_repo,
            hasher,
            validator,
        }
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.user_repo.find_by_role(self.role, search, page).await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id_and_role(id, self.role)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("{} {id} not found", self.role.display_name()))
            })
    }

    pub async fn create(&self, actor: Uuid, req: CreateMemberRequest) -> Result<User, AppError> {
        let name = normalize_name(&req.name)?;
        let email = normalize_email(&req.email)?;
        self.validator.validate(&req.password, &[&name, &email])?;

        let user = self
            .user_repo
            .create(&CreateUser {
                name,
                email,
                password_hash: self.hasher.hash_password(&req.password)?,
                role: self.role,
                company: normalize_company(req.company),
            })
            .await?;

        info!(
            actor_id = %actor,
            user_id = %user.id,
            role = %self.role,
            "User created"
        );
        Ok(user)
    }

    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        req: UpdateMemberRequest,
    ) -> Result<User, AppError> {
        let current = self.get(id).await?;

        let name = req.name.as_deref().map(normalize_name).transpose()?;
        let email = req.email.as_deref().map(normalize_email).transpose()?;
        let password_hash = match req.password.as_deref() {
            Some(password) => {
                let name = name.as_deref().unwrap_or(&current.name);
                let email = email.as_deref().unwrap_or(&current.email);
                self.validator.validate(password, &[name, email])?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let user = self
            .user_repo
            .update(
                id,
                &UpdateUser {
                    name,
                    email,
                    password_hash,
                    company: normalize_company(req.company),
                },
            )
            .await?;

        info!(actor_id = %actor, user_id = %id, role = %self.role, "User updated");
        Ok(user)
    }

    /// Delete after the caller has checked its role-specific guards.
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.user_repo.delete(id).await? {
            return Err(AppError::not_found(format!(
                "{} {id} not found",
                self.role.display_name()
            )));
        }
        info!(actor_id = %actor, user_id = %id, role = %self.role, "User deleted");
        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    Ok(name.to_string())
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(AppError::validation(format!(
            "'{email}' is not a valid email address"
        ))),
    }
}

fn normalize_company(company: Option<String>) -> Option<String> {
    company
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
