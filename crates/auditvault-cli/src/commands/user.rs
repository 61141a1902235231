//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use auditvault_auth::password::{PasswordHasher, PasswordValidator};
use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_core::types::pagination::PageRequest;
use auditvault_database::repositories::UserRepository;
use auditvault_entity::user::{CreateUser, User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user of any role
    Create {
        /// Role: surveyor, client or auditor
        #[arg(short, long, value_parser = parse_role)]
        role: UserRole,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Login email
        #[arg(short, long)]
        email: String,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Company name
        #[arg(short, long)]
        company: Option<String>,
    },
    /// List users, optionally of one role
    List {
        /// Filter by role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<UserRole>,
        /// Match against name or email
        #[arg(short, long)]
        search: Option<String>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Rows per page
        #[arg(long, default_value_t = 50)]
        per_page: u64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    role: String,
    company: String,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            company: u.company.clone().unwrap_or_default(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;
    let user_repo = UserRepository::new(pool.clone());

    match &args.command {
        UserCommand::Create {
            role,
            name,
            email,
            password,
            company,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password("Password")?,
            };
            let user = create_account(
                &user_repo,
                config,
                NewAccount {
                    role: *role,
                    name,
                    email,
                    password: &password,
                    company: company.as_deref(),
                },
            )
            .await?;

            output::print_success(&format!(
                "{} '{}' created (id: {})",
                user.role.display_name(),
                user.email,
                user.id
            ));
        }
        UserCommand::List {
            role,
            search,
            page,
            per_page,
        } => {
            let page = PageRequest::new(*page, *per_page);
            let roles = match role {
                Some(r) => vec![*r],
                None => UserRole::ALL.to_vec(),
            };

            let mut rows = Vec::new();
            for role in roles {
                let users = user_repo.find_by_role(role, search.as_deref(), &page).await?;
                rows.extend(users.items.iter().map(UserRow::from));
            }

            output::print_list(&rows, format);
        }
    }

    pool.close().await;
    Ok(())
}

/// Fields for a new account.
pub(crate) struct NewAccount<'a> {
    pub role: UserRole,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub company: Option<&'a str>,
}

/// Validate, hash, and insert a new account.
pub(crate) async fn create_account(
    user_repo: &UserRepository,
    config: &AppConfig,
    account: NewAccount<'_>,
) -> Result<User, AppError> {
    let name = account.name.trim();
    let email = account.email.trim().to_lowercase();
    if name.is_empty() {
        return Err(AppError::validation("name: must not be empty"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("email: must be a valid email address"));
    }

    PasswordValidator::new(&config.auth).validate(account.password, &[name, &email])?;
    let password_hash = PasswordHasher::new().hash_password(account.password)?;

    user_repo
        .create(&CreateUser {
            name: name.to_string(),
            email,
            password_hash,
            role: account.role,
            company: account
                .company
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        })
        .await
}

/// Prompt for a password twice.
pub(crate) fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    s.parse::<UserRole>().map_err(|e| e.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("client"), Ok(UserRole::Client));
        assert!(parse_role("admin").unwrap_err().contains("surveyor, client, auditor"));
    }
}
