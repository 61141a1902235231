//! Audit projects and their auditor assignments.

pub mod service;

pub use service::{CreateProjectRequest, ProjectService, UpdateProjectRequest};
