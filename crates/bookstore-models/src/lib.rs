//! Catalog domain types for the bookstore.
//!
//! This crate holds the plain data shapes shared by the data-access layer and
//! the presentation surface:
//!
//! - **Catalog**: books, partial book payloads, categories
//! - **Search**: filters, sort options, paged and search results
//! - **API**: response envelope, error body, listing parameters
//! - **Config**: connection settings for the catalog API
//!
//! There is no I/O here.
//!
//! # Example
//!
//! ```rust
//! use bookstore_models::prelude::*;
//!
//! let filter = BookFilter::new()
//!     .with_price_range(Some(10.0), Some(50.0))
//!     .with_in_stock(true);
//! let sort = BookSortOption::asc(SortField::Price);
//!
//! assert_eq!(sort.field.as_str(), "price");
//! assert!(!filter.is_empty());
//! ```

pub mod api;
pub mod catalog;
pub mod config;
mod de;
pub mod error;
pub mod ids;
pub mod search;

pub use error::ModelError;
pub use ids::{BookId, CategoryId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{
        ApiError, ApiResponse, FilterValue, PaginationParams, PayloadField, SearchParams,
    };
    pub use crate::catalog::{Book, BookCategory, BookPatch};
    pub use crate::config::ApiConfig;
    pub use crate::error::ModelError;
    pub use crate::ids::{BookId, CategoryId};
    pub use crate::search::{
        BookFilter, BookSearchResult, BookSortOption, PaginatedResponse, PaginationMeta,
        SortDirection, SortField,
    };
}
