//! Tracing subscriber setup shared by the server binary and the CLI.

use tracing_subscriber::{EnvFilter, fmt};

use auditvault_core::config::LoggingConfig;

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `logging.level`. Calling this twice is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(level = %config.level, format = %config.format, "Logging initialized");
    }
}
