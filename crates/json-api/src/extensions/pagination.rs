//! Skip/limit query parsing.

use hilo_app::pagination::Page;
use salvo::prelude::StatusError;

use crate::config::pagination::PaginationConfig;

pub(crate) trait PaginationExt {
    /// Build a page from optional `skip`/`limit` query values.
    fn page(&self, skip: Option<u32>, limit: Option<u32>) -> Result<Page, StatusError>;
}

impl PaginationExt for PaginationConfig {
    fn page(&self, skip: Option<u32>, limit: Option<u32>) -> Result<Page, StatusError> {
        let limit = limit.unwrap_or(self.default_page_size);

        if limit == 0 {
            return Err(StatusError::bad_request().brief("limit must be greater than zero"));
        }

        Ok(Page::new(skip.unwrap_or(0), limit.min(self.max_page_size)))
    }
}
