//! The book catalog client.
//!
//! [`BookService`] exposes one async method per catalog operation. Every
//! method is a single round trip through the [`FetchClient`] (plus whatever
//! retries its policy allows) and fails with [`FetchError`]. Two operations
//! also publish their result to a [`Subject`]: `get_categories` and
//! `load_books`.

use std::collections::HashMap;
use std::fmt;

use bookstore_models::api::{ApiResponse, PayloadField, SearchParams};
use bookstore_models::catalog::{Book, BookCategory, BookPatch};
use bookstore_models::config::ApiConfig;
use bookstore_models::ids::{BookId, CategoryId};
use bookstore_models::search::{BookFilter, BookSearchResult, BookSortOption, PaginatedResponse};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::query::{self, QueryParams};
use crate::response::Response;
use crate::subject::Subject;
use crate::{FetchClient, FetchError};

/// Page requested when the caller does not pick one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size for list, search and category pages.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
/// Size of the featured, bestseller and recently-added showcases.
pub const DEFAULT_SHOWCASE_LIMIT: u32 = 10;
/// Number of related books shown on a detail page.
pub const DEFAULT_RELATED_LIMIT: u32 = 5;

/// Catalog operations whose result is unwrapped from an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    GetById,
    Categories,
    Featured,
    Bestsellers,
    Recent,
    Related,
    UpdateStock,
    Add,
    Update,
}

impl Operation {
    pub const ALL: [Operation; 9] = [
        Operation::GetById,
        Operation::Categories,
        Operation::Featured,
        Operation::Bestsellers,
        Operation::Recent,
        Operation::Related,
        Operation::UpdateStock,
        Operation::Add,
        Operation::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetById => "get_by_id",
            Operation::Categories => "categories",
            Operation::Featured => "featured",
            Operation::Bestsellers => "bestsellers",
            Operation::Recent => "recent",
            Operation::Related => "related",
            Operation::UpdateStock => "update_stock",
            Operation::Add => "add",
            Operation::Update => "update",
        }
    }

    /// The envelope field the catalog API answers with for this operation.
    ///
    /// The featured listing answers with `products`; everything else with
    /// `data`.
    pub fn default_payload_field(&self) -> PayloadField {
        match self {
            Operation::Featured => PayloadField::Products,
            _ => PayloadField::Data,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-operation overrides of the envelope payload field.
///
/// Serializes as a flat map, e.g. `featured = "data"` in TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadFields(HashMap<Operation, PayloadField>);

impl PayloadFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field to unwrap for `operation`: the override if set, else the default.
    pub fn field_for(&self, operation: Operation) -> PayloadField {
        self.0
            .get(&operation)
            .copied()
            .unwrap_or_else(|| operation.default_payload_field())
    }

    /// Override the field for one operation.
    pub fn with_override(mut self, operation: Operation, field: PayloadField) -> Self {
        self.0.insert(operation, field);
        self
    }

    /// Operations with an explicit override.
    pub fn overrides(&self) -> impl Iterator<Item = (Operation, PayloadField)> + '_ {
        self.0.iter().map(|(op, field)| (*op, *field))
    }
}

/// Client for the book catalog.
///
/// Clones share the transport and both subjects.
#[derive(Debug, Clone)]
pub struct BookService {
    client: FetchClient,
    payload_fields: PayloadFields,
    books: Subject<Vec<Book>>,
    categories: Subject<Vec<BookCategory>>,
}

impl BookService {
    /// Create a service over a configured client. Both subjects start empty.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            payload_fields: PayloadFields::default(),
            books: Subject::default(),
            categories: Subject::default(),
        }
    }

    /// Create a service talking HTTP to the endpoint in `config`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self::new(FetchClient::from_config(config)?))
    }

    pub fn with_payload_fields(mut self, payload_fields: PayloadFields) -> Self {
        self.payload_fields = payload_fields;
        self
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    pub fn payload_fields(&self) -> &PayloadFields {
        &self.payload_fields
    }

    /// The last list of books published by [`BookService::load_books`].
    pub fn books(&self) -> &Subject<Vec<Book>> {
        &self.books
    }

    /// The last category list published by [`BookService::get_categories`].
    pub fn categories(&self) -> &Subject<Vec<BookCategory>> {
        &self.categories
    }

    /// Fetch one page of the general listing.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        params: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Book>, FetchError> {
        let query = query::build_list_query(params);
        let response = self.client.get("").query(query).send().await?;
        response.json()
    }

    /// Fetch one page of the general listing and publish its books.
    #[instrument(skip(self))]
    pub async fn load_books(
        &self,
        params: Option<&SearchParams>,
    ) -> Result<PaginatedResponse<Book>, FetchError> {
        let page = self.list(params).await?;
        self.books.replace(page.data.clone());
        debug!(count = page.data.len(), "books subject replaced");
        Ok(page)
    }

    /// Fetch a single book.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_by_id(&self, id: &BookId) -> Result<Book, FetchError> {
        let path = book_path(id, "")?;
        self.fetch(Operation::GetById, path, QueryParams::new()).await
    }

    /// Search with a structured filter and optional sort.
    #[instrument(skip(self, filter, sort))]
    pub async fn search(
        &self,
        filter: &BookFilter,
        sort: Option<&BookSortOption>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<BookSearchResult, FetchError> {
        let query = query::build_search_query(
            filter,
            sort,
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        let response = self.client.get("/search").query(query).send().await?;
        response.json()
    }

    /// Fetch all categories and publish them.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<BookCategory>, FetchError> {
        let categories: Vec<BookCategory> = self
            .fetch(Operation::Categories, "/categories".to_string(), QueryParams::new())
            .await?;
        self.categories.replace(categories.clone());
        debug!(count = categories.len(), "categories subject replaced");
        Ok(categories)
    }

    /// Fetch one page of books in a category.
    #[instrument(skip(self), fields(category = %category_id))]
    pub async fn get_books_by_category(
        &self,
        category_id: &CategoryId,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<PaginatedResponse<Book>, FetchError> {
        let segment = path_segment("category id", category_id.as_str())?;
        let query = query::build_category_query(
            segment,
            page.unwrap_or(DEFAULT_PAGE),
            limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        let response = self
            .client
            .get(format!("/category/{segment}"))
            .query(query)
            .send()
            .await?;
        response.json()
    }

    #[instrument(skip(self))]
    pub async fn get_featured_books(&self, limit: Option<u32>) -> Result<Vec<Book>, FetchError> {
        let limit = showcase_limit(limit, DEFAULT_SHOWCASE_LIMIT)?;
        self.fetch(Operation::Featured, String::new(), query::build_limit_query(limit))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_bestseller_books(&self, limit: Option<u32>) -> Result<Vec<Book>, FetchError> {
        let limit = showcase_limit(limit, DEFAULT_SHOWCASE_LIMIT)?;
        self.fetch(
            Operation::Bestsellers,
            "/bestsellers".to_string(),
            query::build_limit_query(limit),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get_recently_added_books(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<Book>, FetchError> {
        let limit = showcase_limit(limit, DEFAULT_SHOWCASE_LIMIT)?;
        self.fetch(
            Operation::Recent,
            "/recent".to_string(),
            query::build_limit_query(limit),
        )
        .await
    }

    /// Books related to `book_id`, for the detail page.
    #[instrument(skip(self), fields(id = %book_id))]
    pub async fn get_related_books(
        &self,
        book_id: &BookId,
        limit: Option<u32>,
    ) -> Result<Vec<Book>, FetchError> {
        let path = book_path(book_id, "/related")?;
        let limit = showcase_limit(limit, DEFAULT_RELATED_LIMIT)?;
        self.fetch(Operation::Related, path, query::build_limit_query(limit))
            .await
    }

    /// Set the stock quantity. The quantity is passed through unchecked.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn update_book_stock(&self, id: &BookId, quantity: i64) -> Result<Book, FetchError> {
        let path = book_path(id, "/stock")?;
        let response = self
            .client
            .patch(path)
            .json(&json!({ "quantity": quantity }))?
            .send()
            .await?;
        self.unwrap(Operation::UpdateStock, &response)
    }

    #[instrument(skip(self, book))]
    pub async fn add_book(&self, book: &BookPatch) -> Result<Book, FetchError> {
        let response = self.client.post("").json(book)?.send().await?;
        self.unwrap(Operation::Add, &response)
    }

    #[instrument(skip(self, book), fields(id = %id))]
    pub async fn update_book(&self, id: &BookId, book: &BookPatch) -> Result<Book, FetchError> {
        let path = book_path(id, "")?;
        let response = self.client.put(path).json(book)?.send().await?;
        self.unwrap(Operation::Update, &response)
    }

    /// Delete a book. Any response body is ignored.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_book(&self, id: &BookId) -> Result<(), FetchError> {
        let path = book_path(id, "")?;
        self.client.delete(path).send().await?;
        Ok(())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: String,
        query: QueryParams,
    ) -> Result<T, FetchError> {
        let response = self.client.get(path).query(query).send().await?;
        self.unwrap(operation, &response)
    }

    fn unwrap<T: DeserializeOwned>(
        &self,
        operation: Operation,
        response: &Response,
    ) -> Result<T, FetchError> {
        let envelope: ApiResponse = response.json()?;
        let field = self.payload_fields.field_for(operation);
        let payload = envelope.into_payload(field)?;
        serde_json::from_value(payload).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Validate an id for use as a single path segment.
fn path_segment<'a>(what: &str, id: &'a str) -> Result<&'a str, FetchError> {
    if id.trim().is_empty() {
        return Err(FetchError::InvalidArgument(format!("{what} must not be empty")));
    }
    if id.contains(['/', '?', '#']) {
        return Err(FetchError::InvalidArgument(format!(
            "{what} `{id}` contains a reserved character"
        )));
    }
    Ok(id)
}

fn book_path(id: &BookId, suffix: &str) -> Result<String, FetchError> {
    let segment = path_segment("book id", id.as_str())?;
    Ok(format!("/{segment}{suffix}"))
}

fn showcase_limit(limit: Option<u32>, default: u32) -> Result<u32, FetchError> {
    match limit.unwrap_or(default) {
        0 => Err(FetchError::InvalidArgument(
            "limit must be greater than zero".to_string(),
        )),
        n => Ok(n),
    }
}
