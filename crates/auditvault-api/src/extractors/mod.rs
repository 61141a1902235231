//! Custom Axum extractors.

pub mod auth;
pub mod cron;
pub mod pagination;

pub use auth::AuthUser;
pub use cron::CronAuth;
pub use pagination::PaginationParams;
