//! Pagination

/// Offset pagination window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    pub(crate) fn offset(self) -> i64 {
        i64::from(self.skip)
    }

    pub(crate) fn limit(self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 20)
    }
}
