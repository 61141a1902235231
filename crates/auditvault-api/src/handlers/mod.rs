//! HTTP request handlers, one module per resource.

pub mod auditors;
pub mod auth;
pub mod clients;
pub mod cron;
pub mod documents;
pub mod folders;
pub mod health;
pub mod projects;
pub mod uploads;
