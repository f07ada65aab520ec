//! Book catalog module.
//!
//! Contains the book record, its partial update form, and categories.

mod book;
mod category;

pub use book::{Book, BookPatch};
pub use category::BookCategory;
