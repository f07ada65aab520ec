//! Search module.
//!
//! Contains filter, sort, and result types for catalog queries.

mod filter;
mod results;
mod sort;

pub use filter::BookFilter;
pub use results::{BookSearchResult, PaginatedResponse, PaginationMeta};
pub use sort::{BookSortOption, SortDirection, SortField};
