//! Start the AuditVault server.

use clap::Args;

use auditvault_core::config::AppConfig;
use auditvault_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip migrations even when `database.migrate_on_start` is set
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    auditvault_api::init_logging(&config.logging);

    let pool = super::create_db_pool(&config).await?;

    if config.database.migrate_on_start && !args.no_migrate {
        auditvault_database::migration::run_migrations(&pool).await?;
    }

    auditvault_api::run_server(config, pool).await
}
