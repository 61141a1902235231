//! Login and current-user lookup.

pub mod service;

pub use service::{AuthService, LoginResponse};
