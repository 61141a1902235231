//! # auditvault-api
//!
//! HTTP API layer for AuditVault built on Axum.
//!
//! Provides all REST endpoints under `/api`, middleware (CORS, compression,
//! tracing, request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, run_server};
pub use state::AppState;
pub use telemetry::init_logging;
