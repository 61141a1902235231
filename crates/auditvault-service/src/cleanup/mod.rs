//! Retention cleanup of old documents.

pub mod service;

pub use service::{CleanupReport, CleanupService, retention_cutoff};
