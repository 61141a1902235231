//! # auditvault-auth
//!
//! Authentication and authorization for AuditVault.
//!
//! ## Modules
//!
//! - `jwt`: access token creation and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: role guards for surveyor-only and role-restricted operations
//! - `policy`: the single document access predicate and folder access rules

pub mod jwt;
pub mod password;
pub mod policy;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use policy::{AccessGrant, DocumentAccessContext, DocumentAccessPolicy, FolderAccess};
pub use rbac::RbacEnforcer;
