//! Role-scoped user management for clients and auditors.

pub mod auditor;
pub mod client;
pub mod directory;

pub use auditor::AuditorService;
pub use client::ClientService;
pub use directory::{CreateMemberRequest, RoleDirectory, UpdateMemberRequest};
