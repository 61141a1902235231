//! Bearer check for the cron cleanup endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use subtle::ConstantTimeEq;

use auditvault_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured cron secret.
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let secret = state.config.cleanup.cron_secret.as_str();
        if secret.is_empty() {
            return Err(AppError::service_unavailable(
                "Cron cleanup is disabled: no cron secret configured",
            )
            .into());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::authentication("Missing cron bearer token"))?;

        if secret_matches(bearer.token(), secret) {
            Ok(CronAuth)
        } else {
            tracing::warn!("Rejected cron request with wrong secret");
            Err(AppError::authentication("Invalid cron bearer token").into())
        }
    }
}

/// Compare without leaking the matching prefix length through timing.
fn secret_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches("s3cr3t-token", "s3cr3t-token"));
        assert!(!secret_matches("s3cr3t-tokeN", "s3cr3t-token"));
        assert!(!secret_matches("s3cr3t", "s3cr3t-token"));
        assert!(!secret_matches("", "s3cr3t-token"));
    }
}
