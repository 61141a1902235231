//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! TOML files and environment variables. Each sub-module represents a
//! logical configuration section.

pub mod app;
pub mod auth;
pub mod cleanup;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::cleanup::{CleanupConfig, MAX_RETENTION_DAYS};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::{MAX_PRESIGN_SECONDS, MIN_PRESIGN_SECONDS, S3StorageConfig, StorageConfig};

use crate::error::AppError;

/// Conventional environment variables that override individual keys.
///
/// These sit on top of the `AUDITVAULT__SECTION__KEY` variables so the
/// service can be deployed with the names hosting platforms expect.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("AUTH_SECRET", "auth.jwt_secret"),
    ("CRON_SECRET", "cleanup.cron_secret"),
    ("COMPANY_NAME", "storage.company"),
    ("S3_ENDPOINT", "storage.s3.endpoint"),
    ("S3_REGION", "storage.s3.region"),
    ("S3_BUCKET", "storage.s3.bucket"),
    ("S3_ACCESS_KEY_ID", "storage.s3.access_key"),
    ("S3_SECRET_ACCESS_KEY", "storage.s3.secret_key"),
];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the loaded environment (`development`, `production`, ...).
    #[serde(default)]
    pub environment: String,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Retention cleanup settings.
    #[serde(default)]
    pub cleanup: CleanupConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, `AUDITVAULT__*` variables, then the
    /// conventional variables in [`ENV_OVERRIDES`].
    pub fn load(env: &str) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("AUDITVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", env)?;

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config: Self = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Whether this is a development deployment.
    pub fn is_development(&self) -> bool {
        self.environment.is_empty() || self.environment == "development" || self.environment == "test"
    }

    /// Check cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, secs) in [
            ("storage.presign_put_seconds", self.storage.presign_put_seconds),
            ("storage.presign_get_seconds", self.storage.presign_get_seconds),
        ] {
            if !(MIN_PRESIGN_SECONDS..=MAX_PRESIGN_SECONDS).contains(&secs) {
                return Err(AppError::configuration(format!(
                    "{name} must be between {MIN_PRESIGN_SECONDS} and {MAX_PRESIGN_SECONDS}, got {secs}"
                )));
            }
        }

        if !(1..=MAX_RETENTION_DAYS).contains(&self.cleanup.retention_days) {
            return Err(AppError::configuration(format!(
                "cleanup.retention_days must be between 1 and {MAX_RETENTION_DAYS}, got {}",
                self.cleanup.retention_days
            )));
        }

        if !self.is_development() && self.auth.jwt_secret.len() < 32 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 32 characters outside development",
            ));
        }

        if self.storage.provider == "s3" && !self.is_development() && self.storage.s3.bucket.is_empty()
        {
            return Err(AppError::configuration("storage.s3.bucket is required"));
        }

        Ok(())
    }
}
