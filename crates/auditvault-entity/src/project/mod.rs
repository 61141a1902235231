//! Project domain entities.

pub mod model;

pub use model::{CreateProject, Project, ProjectDetail};
