//! # auditvault-storage
//!
//! Object storage for AuditVault documents: the key naming scheme, the
//! stateless chunk protocol, and [`ObjectStore`] providers (S3 and an
//! in-memory store used by tests and local development).
//!
//! [`ObjectStore`]: auditvault_core::traits::ObjectStore

pub mod chunked;
pub mod key;
pub mod providers;

pub use chunked::{ChunkDescriptor, ChunkPosition};
pub use key::ObjectKey;
pub use providers::{MemoryObjectStore, build_object_store};
