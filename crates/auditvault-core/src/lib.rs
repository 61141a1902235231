//! # auditvault-core
//!
//! Core crate for AuditVault. Holds the configuration schema, the unified
//! error system, pagination types, and the object store trait that the
//! storage crate implements.
//!
//! This crate has **no** internal dependencies on other AuditVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
