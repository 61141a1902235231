//! # auditvault-service
//!
//! Business logic service layer for AuditVault. Each service orchestrates
//! repositories, the object store, and the auth crate's guards to
//! implement one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod cleanup;
pub mod context;
pub mod document;
pub mod folder;
pub mod project;
pub mod upload;
pub mod user;

pub use auth::AuthService;
pub use cleanup::{CleanupReport, CleanupService};
pub use context::RequestContext;
pub use document::{DocumentService, DocumentView};
pub use folder::FolderService;
pub use project::ProjectService;
pub use upload::UploadService;
pub use user::{AuditorService, ClientService, RoleDirectory};
