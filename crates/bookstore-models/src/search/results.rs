//! Search results and pagination.
//!
//! Pagination metadata is computed by the server and trusted as-is; the
//! helpers here only derive display values from it.

use crate::catalog::Book;
use serde::{Deserialize, Serialize};

/// Pagination metadata attached to a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationMeta {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationMeta {
    /// Get start item number (1-indexed), 0 for an empty result.
    pub fn start_item(&self) -> u64 {
        if self.total == 0 || self.page == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.limit) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }
}

/// A page of items plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginatedResponse<T> {
    /// The items on this page.
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self { data, pagination }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Result of a filtered search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BookSearchResult {
    pub books: Vec<Book>,
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl BookSearchResult {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Get number of books in this page.
    pub fn len(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_range() {
        let meta = PaginationMeta {
            page: 2,
            limit: 10,
            total: 45,
            total_pages: 5,
            has_next: true,
            has_previous: true,
        };
        assert_eq!(meta.start_item(), 11);
        assert_eq!(meta.end_item(), 20);
    }

    #[test]
    fn test_item_range_last_partial_page() {
        let meta = PaginationMeta {
            page: 5,
            limit: 10,
            total: 45,
            total_pages: 5,
            has_next: false,
            has_previous: true,
        };
        assert_eq!(meta.start_item(), 41);
        assert_eq!(meta.end_item(), 45);
    }

    #[test]
    fn test_item_range_empty() {
        let meta = PaginationMeta::default();
        assert_eq!(meta.start_item(), 0);
        assert_eq!(meta.end_item(), 0);
    }

    #[test]
    fn test_paginated_response_decodes() {
        let page: PaginatedResponse<Book> = serde_json::from_value(json!({
            "data": [{ "id": "1", "title": "Dune" }],
            "pagination": {
                "page": 1, "limit": 20, "total": 1, "totalPages": 1,
                "hasNext": false, "hasPrevious": false
            }
        }))
        .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.pagination.total_pages, 1);
    }

    #[test]
    fn test_search_result_decodes() {
        let result: BookSearchResult = serde_json::from_value(json!({
            "books": [],
            "totalCount": 0,
            "currentPage": 1,
            "totalPages": 0,
            "hasNextPage": false,
            "hasPreviousPage": false
        }))
        .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.current_page, 1);
    }
}
