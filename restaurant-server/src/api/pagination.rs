//! `?page=&recordPerPage=` query parsing
//!
//! Values that are missing, non-numeric or below 1 fall back to the
//! defaults instead of rejecting the request.

use serde::Deserialize;

pub const DEFAULT_PER_PAGE: usize = 10;
pub const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    page: Option<String>,
    #[serde(rename = "recordPerPage")]
    record_per_page: Option<String>,
}

impl Pagination {
    /// 1-based page number
    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(1)
    }

    pub fn per_page(&self) -> usize {
        parse_positive(self.record_per_page.as_deref())
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE)
    }

    /// Number of records before this page
    pub fn skip(&self) -> usize {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v >= 1)
}
