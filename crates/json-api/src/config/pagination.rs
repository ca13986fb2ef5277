//! Pagination Config

use clap::Args;

/// Paging limits applied to list endpoints.
#[derive(Debug, Clone, Copy, Args)]
pub struct PaginationConfig {
    /// Page size used when a request omits `limit`
    #[arg(long, env = "DEFAULT_PAGE_SIZE", default_value_t = 20)]
    pub default_page_size: u32,

    /// Largest page size a request may ask for
    #[arg(long, env = "MAX_PAGE_SIZE", default_value_t = 100)]
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}
