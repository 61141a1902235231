//! # auditvault-entity
//!
//! Domain entity models for AuditVault. Every struct in this crate
//! represents a database table row or the input for writing one. Row
//! types derive `sqlx::FromRow`.

pub mod document;
pub mod folder;
pub mod project;
pub mod role;
pub mod user;
