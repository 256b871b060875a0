//! Pagination types
//!
//! Page numbers are 1-indexed throughout.

use serde::{Deserialize, Serialize};

/// Default number of items per page on the moderation screen
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a derived list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// Current page number (1-indexed)
    pub page: usize,
    /// Number of items per page
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Calculate the total number of pages (never less than 1)
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.per_page)
    }

    /// Check if there is a next page
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there is a previous page
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// `ceil(total / per_page)`, minimum 1
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// Slice `[(page-1)*per_page, page*per_page)` out of `items`, clipped to bounds.
///
/// Out-of-range pages produce an empty page rather than an error. A page of
/// 0 is read as page 1 and a page size of 0 as 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        total: items.len(),
        page,
        per_page,
    }
}
