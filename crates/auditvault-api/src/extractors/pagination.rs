//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use auditvault_core::types::pagination::{DEFAULT_PAGE_SIZE, PageRequest};

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 20, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Case-insensitive name/email filter, where supported.
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Converts to a `PageRequest`.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
