//! Access policies for folders and documents.

pub mod document;
pub mod folder;

pub use document::{AccessGrant, DocumentAccessContext, DocumentAccessPolicy};
pub use folder::FolderAccess;
