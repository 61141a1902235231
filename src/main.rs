//! AuditVault Server: audit document sharing portal
//!
//! Main entry point that loads configuration, prepares the database and
//! starts the HTTP server.

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;
use auditvault_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    auditvault_api::init_logging(&config.logging);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration for the environment named by `AUDITVAULT_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("AUDITVAULT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        environment = %config.environment,
        "Starting AuditVault v{}",
        env!("CARGO_PKG_VERSION")
    );

    // ── Step 1: Database connection ──────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;

    // ── Step 2: Migrations ───────────────────────────────────────
    if config.database.migrate_on_start {
        auditvault_database::migration::run_migrations(db.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.migrate_on_start = false)");
    }

    // ── Step 3: HTTP server ──────────────────────────────────────
    auditvault_api::run_server(config, db.handle()).await?;

    db.close().await;
    Ok(())
}
