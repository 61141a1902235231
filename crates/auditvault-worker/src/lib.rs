//! Scheduled background tasks for AuditVault.
//!
//! This crate provides:
//! - A job handler trait and error type shared by every task
//! - A cron scheduler that runs handlers on their schedules
//! - The document retention cleanup job

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobHandler};
pub use jobs::cleanup::DocumentCleanupJob;
pub use scheduler::CronScheduler;
