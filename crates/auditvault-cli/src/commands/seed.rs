//! Bootstrap the first surveyor account.
//!
//! Roles themselves are inserted by the initial migration; this command
//! only creates the administrator that can then create everyone else.

use clap::Args;

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_database::repositories::{RoleRepository, UserRepository};
use auditvault_entity::user::UserRole;

use super::user::{NewAccount, create_account, prompt_password};
use crate::output;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Surveyor name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Surveyor email
    #[arg(short, long)]
    pub email: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long)]
    pub password: Option<String>,
    /// Create another surveyor even if one exists
    #[arg(long)]
    pub force: bool,
}

/// Execute the seed command
pub async fn execute(args: &SeedArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let user_repo = UserRepository::new(pool.clone());

    if RoleRepository::new(pool.clone())
        .find_by_code(UserRole::Surveyor)
        .await?
        .is_none()
    {
        pool.close().await;
        return Err(AppError::configuration(
            "The roles table is empty; run `auditvault migrate` first",
        ));
    }

    let existing = user_repo.count_by_role(UserRole::Surveyor).await?;
    if existing > 0 && !args.force {
        output::print_warning(&format!(
            "{existing} surveyor account(s) already exist; use --force to add another"
        ));
        pool.close().await;
        return Ok(());
    }

    let name = match &args.name {
        Some(n) => n.clone(),
        None => prompt_text("Surveyor name")?,
    };
    let email = match &args.email {
        Some(e) => e.clone(),
        None => prompt_text("Surveyor email")?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt_password("Surveyor password")?,
    };

    let user = create_account(
        &user_repo,
        config,
        NewAccount {
            role: UserRole::Surveyor,
            name: &name,
            email: &email,
            password: &password,
            company: Some(&config.storage.company),
        },
    )
    .await?;

    output::print_success("Surveyor account created");
    output::print_kv("ID", &user.id.to_string());
    output::print_kv("Email", &user.email);

    pool.close().await;
    Ok(())
}

fn prompt_text(prompt: &str) -> Result<String, AppError> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
