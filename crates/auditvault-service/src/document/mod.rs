//! Document reads, downloads, and deletion.

pub mod service;
pub mod view;

pub use service::{DocumentService, DownloadLink};
pub use view::DocumentView;
