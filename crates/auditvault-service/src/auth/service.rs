//! Authentication service: credential check and token issuance.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use auditvault_auth::jwt::{IssuedToken, JwtEncoder};
use auditvault_auth::password::PasswordHasher;
use auditvault_core::error::AppError;
use auditvault_database::repositories::UserRepository;
use auditvault_entity::user::User;

use crate::context::RequestContext;

/// Response returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: User,
}

/// Verifies credentials and issues access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
        }
    }

    /// Authenticate by email and password.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            warn!(email = %email, "Login attempt for unknown email");
            return Err(AppError::authentication("Invalid email or password"));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid email or password"));
        }

        let token = self.encoder.issue(&user)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(LoginResponse { token, user })
    }

    /// Load the user behind the current request.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::authentication("The account no longer exists"))
    }
}
