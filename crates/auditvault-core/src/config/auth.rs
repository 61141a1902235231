//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Overridden by `AUTH_SECRET`.
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_access_ttl_minutes: default_access_ttl(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_access_ttl() -> u64 {
    12 * 60
}

fn default_password_min() -> usize {
    8
}
