//! # auditvault-database
//!
//! PostgreSQL connection management, migrations, and repositories for
//! users, roles, folders, projects, and documents.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
