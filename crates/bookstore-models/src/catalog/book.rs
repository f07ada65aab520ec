//! Book record and partial-update payload.

use crate::catalog::BookCategory;
use crate::de::null_as_default;
use crate::ids::BookId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book in the catalog.
///
/// Records are server-provided and decoded leniently: a field the server
/// leaves out or sends as `null` takes its default value instead of failing
/// the whole response. A bare string category is read as a category whose id
/// and name are that string.
///
/// Price and stock invariants are the server's responsibility and are not
/// enforced here; [`Book::stock_is_consistent`] reports on them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    /// Unique book identifier.
    #[serde(deserialize_with = "null_as_default")]
    pub id: BookId,
    /// Book title.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Author display name.
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    /// ISBN as printed.
    #[serde(deserialize_with = "null_as_default")]
    pub isbn: String,
    /// Unit price, never negative.
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    /// Full description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// URL of the cover image.
    #[serde(deserialize_with = "null_as_default")]
    pub cover_image_url: String,
    /// Category this book is filed under.
    #[serde(deserialize_with = "null_as_default")]
    pub category: BookCategory,
    /// Publication date.
    #[serde(deserialize_with = "null_as_default")]
    pub published_date: DateTime<Utc>,
    /// Number of pages.
    #[serde(deserialize_with = "null_as_default")]
    pub page_count: u32,
    /// Language of the edition.
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    /// Publisher name.
    #[serde(deserialize_with = "null_as_default")]
    pub publisher: String,
    /// Average review rating.
    #[serde(deserialize_with = "null_as_default")]
    pub rating: f64,
    /// Number of reviews behind `rating`.
    #[serde(deserialize_with = "null_as_default")]
    pub review_count: u32,
    /// Whether the book can be ordered.
    #[serde(deserialize_with = "null_as_default")]
    pub in_stock: bool,
    /// Units on hand.
    #[serde(deserialize_with = "null_as_default")]
    pub stock_quantity: u32,
    /// Free-form tags, unique, kept in server order.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Additional image URLs, in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

impl Book {
    /// Create a book with the given identity and title; everything else defaults.
    pub fn new(id: impl Into<BookId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Whether `in_stock` agrees with `stock_quantity`.
    pub fn stock_is_consistent(&self) -> bool {
        self.in_stock == (self.stock_quantity > 0)
    }

    /// Whether the price honors the non-negative invariant.
    pub fn has_valid_price(&self) -> bool {
        self.price >= 0.0 && self.price.is_finite()
    }

    /// Check if the book carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag, ignoring duplicates.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.has_tag(&tag) {
            self.tags.push(tag);
        }
    }
}

/// A partial book, used as the body of create and update requests.
///
/// Only the fields that are set are serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<BookCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl BookPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the stock quantity and the matching availability flag.
    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = Some(quantity);
        self.in_stock = Some(quantity > 0);
        self
    }

    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_book_wire_names_are_camel_case() {
        let mut book = Book::new("1", "Dune");
        book.cover_image_url = "https://img/dune.jpg".to_string();
        book.stock_quantity = 3;
        book.in_stock = true;

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["coverImageUrl"], "https://img/dune.jpg");
        assert_eq!(value["stockQuantity"], 3);
        assert_eq!(value["inStock"], true);
        assert!(value.get("cover_image_url").is_none());
    }

    #[test]
    fn test_book_decodes_partial_record() {
        let book: Book = serde_json::from_value(json!({
            "id": 9,
            "title": "Essence and Peculiarity",
            "price": 9.99,
            "tags": ["beauty", "mascara"]
        }))
        .unwrap();

        assert_eq!(book.id.as_str(), "9");
        assert_eq!(book.title, "Essence and Peculiarity");
        assert_eq!(book.tags, vec!["beauty", "mascara"]);
        assert_eq!(book.stock_quantity, 0);
        assert!(book.images.is_empty());
    }

    #[test]
    fn test_book_decodes_string_category_and_nulls() {
        let book: Book = serde_json::from_value(json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "category": "beauty",
            "price": 9.99,
            "author": null,
            "rating": null,
            "tags": null,
            "publishedDate": null
        }))
        .unwrap();

        assert_eq!(book.category, BookCategory::new("beauty", "beauty"));
        assert_eq!(book.author, "");
        assert_eq!(book.rating, 0.0);
        assert!(book.tags.is_empty());
        assert_eq!(book.published_date, DateTime::<Utc>::default());
    }

    #[test]
    fn test_book_null_category_is_default() {
        let book: Book = serde_json::from_value(json!({ "id": "b1", "category": null })).unwrap();
        assert_eq!(book.category, BookCategory::default());
    }

    #[test]
    fn test_published_date_round_trips_rfc3339() {
        let book: Book = serde_json::from_value(json!({
            "id": "b1",
            "publishedDate": "1965-08-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(book.published_date.to_rfc3339(), "1965-08-01T00:00:00+00:00");
    }

    #[test]
    fn test_stock_consistency() {
        let mut book = Book::new("1", "Dune");
        assert!(book.stock_is_consistent());

        book.in_stock = true;
        assert!(!book.stock_is_consistent());

        book.stock_quantity = 4;
        assert!(book.stock_is_consistent());
    }

    #[test]
    fn test_price_invariant() {
        let mut book = Book::new("1", "Dune");
        assert!(book.has_valid_price());
        book.price = -1.0;
        assert!(!book.has_valid_price());
    }

    #[test]
    fn test_add_tag_deduplicates() {
        let mut book = Book::new("1", "Dune");
        book.add_tag("scifi");
        book.add_tag("scifi");
        book.add_tag("classic");
        assert_eq!(book.tags, vec!["scifi", "classic"]);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = BookPatch::new().with_title("Dune Messiah").with_stock(0);
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            value,
            json!({ "title": "Dune Messiah", "stockQuantity": 0, "inStock": false })
        );
    }

    #[test]
    fn test_empty_patch() {
        assert!(BookPatch::new().is_empty());
        assert!(!BookPatch::new().with_price(1.0).is_empty());
        assert_eq!(serde_json::to_string(&BookPatch::new()).unwrap(), "{}");
    }
}
