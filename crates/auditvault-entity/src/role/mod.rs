//! Role lookup table.

pub mod model;

pub use model::Role;
