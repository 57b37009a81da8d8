//! Page/limit handling shared by list endpoints

use serde::Deserialize;

use crate::config::PaginationConfig;

/// Normalised page window. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Rows to skip. Saturates so an absurd page lands past the end.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Raw `?page=&limit=` query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Clamp to page >= 1 and limit in [1, max_limit]
    pub fn normalize(&self, config: &PaginationConfig) -> Pagination {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(config.default_limit)
            .clamp(1, config.max_limit.max(1));
        Pagination { page, limit }
    }
}
