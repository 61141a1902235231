//! Document retention and cron cleanup configuration.

use serde::{Deserialize, Serialize};

/// Upper bound for `retention_days` (one hundred years).
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Retention cleanup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Bearer token the cron route expects. Overridden by `CRON_SECRET`.
    /// An empty secret disables the route.
    #[serde(default)]
    pub cron_secret: String,
    /// Documents older than this many days are removed.
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,
    /// Whether the in-process scheduler runs the cleanup job.
    #[serde(default)]
    pub scheduler_enabled: bool,
    /// Six-field cron expression used by the in-process scheduler.
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cron_secret: String::new(),
            retention_days: default_retention_days(),
            scheduler_enabled: false,
            schedule: default_schedule(),
        }
    }
}

fn default_retention_days() -> i64 {
    30
}

fn default_schedule() -> String {
    // 03:00 UTC daily
    "0 0 3 * * *".to_string()
}
