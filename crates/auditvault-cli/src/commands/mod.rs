//! CLI command definitions and dispatch.

pub mod cleanup;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use sqlx::PgPool;

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_database::DatabasePool;

use crate::output::OutputFormat;

/// AuditVault: audit document sharing for surveyors, clients and auditors
#[derive(Debug, Parser)]
#[command(name = "auditvault", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (loads `config/{env}.toml`)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Create the first surveyor account
    Seed(seed::SeedArgs),
    /// User management
    User(user::UserArgs),
    /// Delete documents past the retention period
    Cleanup,
}

impl Cli {
    /// Whether the selected command runs the server.
    pub fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve(_))
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(self.env.as_deref())?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config, self.format).await,
            Commands::Seed(args) => seed::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Cleanup => cleanup::execute(&config, self.format).await,
        }
    }
}

/// Helper: load configuration for an environment
///
/// Falls back to `AUDITVAULT_ENV`, then `development`.
pub fn load_config(env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(str::to_string)
        .or_else(|| std::env::var("AUDITVAULT_ENV").ok())
        .unwrap_or_else(|| "development".to_string());
    AppConfig::load(&env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(pool.handle())
}
