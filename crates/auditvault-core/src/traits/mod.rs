//! Core traits defined in `auditvault-core` and implemented by other crates.

pub mod storage;

pub use storage::{ObjectStore, PresignedRequest};
