//! Integration tests driving the HTTP router against a real Postgres.
//!
//! Every test is skipped unless `DATABASE_URL` points at a database the
//! suite may migrate. Tests create their own uniquely-named rows and never
//! truncate, so they can run concurrently against one database.

mod helpers;

mod auth_test;
mod cleanup_test;
mod document_test;
mod folder_test;
mod member_test;
mod upload_test;
