//! Database migration command.

use serde::Serialize;
use tabled::Tabled;

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_database::repositories::RoleRepository;

use crate::output::{self, OutputFormat};

/// Seeded role row for table output
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    id: i16,
    code: String,
    display_name: String,
}

/// Apply every pending migration, then show the seeded roles.
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    println!("Running database migrations...");
    auditvault_database::migration::run_migrations(&pool).await?;
    output::print_success("All migrations applied successfully.");

    let roles: Vec<RoleRow> = RoleRepository::new(pool.clone())
        .find_all()
        .await?
        .into_iter()
        .map(|r| RoleRow {
            id: r.id,
            code: r.code.to_string(),
            display_name: r.display_name,
        })
        .collect();
    output::print_list(&roles, format);

    pool.close().await;
    Ok(())
}
