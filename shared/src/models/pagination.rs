//! Server-side pagination metadata

use serde::{Deserialize, Serialize};

/// Page position reported alongside a list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: Option<u64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: None,
        }
    }
}

impl Pagination {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Single-page results need no pager
    pub fn is_paged(&self) -> bool {
        self.total_pages > 1
    }
}
