//! Query builder for catalog requests.
//!
//! Turns structured filter, sort, and pagination input into the flat
//! parameter set sent on a GET. Only fields that are present are emitted;
//! values are stringified; keys from open-ended filter maps pass through
//! unchecked.

use bookstore_models::api::SearchParams;
use bookstore_models::search::{BookFilter, BookSortOption};

/// Ordered query parameters with set semantics.
///
/// Setting a key that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Set a parameter only when a value is present.
    pub fn set_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value.to_string());
        }
        self
    }

    /// Set a text parameter when present and non-empty.
    pub fn set_text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
        self
    }

    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parameter names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

/// Build the parameters for a general listing.
///
/// Emits `search`, `page`, `limit`, `sortBy`, `sortOrder`, then each filter
/// entry with a non-null value. Filter keys are not validated and may
/// overwrite earlier parameters.
pub fn build_list_query(params: Option<&SearchParams>) -> QueryParams {
    let mut query = QueryParams::new();
    let Some(params) = params else {
        return query;
    };

    query.set_text("search", params.query.as_deref());

    if let Some(pagination) = &params.pagination {
        query.set("page", pagination.page.to_string());
        query.set("limit", pagination.limit.to_string());
        query.set_text("sortBy", pagination.sort_by.as_deref());
        query.set_opt("sortOrder", pagination.sort_order);
    }

    if let Some(filters) = &params.filters {
        for (key, value) in filters {
            if let Some(value) = value.to_param() {
                query.set(key.as_str(), value);
            }
        }
    }

    query
}

/// Build the parameters for a filtered search.
///
/// Each recognized filter field maps to its own parameter name; the free-text
/// term is sent as `search`. The sort option's tokens are sent verbatim.
pub fn build_search_query(
    filter: &BookFilter,
    sort: Option<&BookSortOption>,
    page: u32,
    limit: u32,
) -> QueryParams {
    let mut query = QueryParams::new();
    query.set("page", page.to_string());
    query.set("limit", limit.to_string());

    query
        .set_text("category", filter.category.as_deref())
        .set_opt("minPrice", filter.min_price)
        .set_opt("maxPrice", filter.max_price)
        .set_text("author", filter.author.as_deref())
        .set_opt("rating", filter.rating)
        .set_opt("inStock", filter.in_stock)
        .set_text("search", filter.search_term.as_deref());

    if let Some(sort) = sort {
        query.set("sortBy", sort.field.as_str());
        query.set("sortOrder", sort.direction.as_str());
    }

    query
}

/// Build the parameters for a category page.
pub fn build_category_query(category: &str, page: u32, limit: u32) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .set("category", category)
        .set("page", page.to_string())
        .set("limit", limit.to_string());
    query
}

/// Build a `limit`-only parameter set.
pub fn build_limit_query(limit: u32) -> QueryParams {
    let mut query = QueryParams::new();
    query.set("limit", limit.to_string());
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_models::api::{FilterValue, PaginationParams};
    use bookstore_models::search::{SortDirection, SortField};
    use pretty_assertions::assert_eq;

    fn keys(query: &QueryParams) -> Vec<&str> {
        query.keys().collect()
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut query = QueryParams::new();
        query.set("a", "1").set("b", "2").set("a", "3");
        assert_eq!(keys(&query), vec!["a", "b"]);
        assert_eq!(query.get("a"), Some("3"));
    }

    #[test]
    fn test_query_string_encoding() {
        let mut query = QueryParams::new();
        query.set("search", "war & peace").set("page", "1");
        assert_eq!(query.to_query_string(), "search=war+%26+peace&page=1");
    }

    #[test]
    fn test_list_query_without_params_is_empty() {
        assert!(build_list_query(None).is_empty());
        assert!(build_list_query(Some(&SearchParams::new())).is_empty());
    }

    #[test]
    fn test_list_query_full() {
        let params = SearchParams::new()
            .with_query("dune")
            .with_pagination(PaginationParams::new(2, 10).with_sort("price", SortDirection::Desc))
            .with_filter("author", "Herbert")
            .with_filter("rating", 4.5);

        let query = build_list_query(Some(&params));
        assert_eq!(
            keys(&query),
            vec!["search", "page", "limit", "sortBy", "sortOrder", "author", "rating"]
        );
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("sortOrder"), Some("desc"));
        assert_eq!(query.get("rating"), Some("4.5"));
    }

    #[test]
    fn test_list_query_omits_null_filters_and_empty_query() {
        let params = SearchParams::new()
            .with_query("")
            .with_filter("author", FilterValue::Null)
            .with_filter("inStock", false);

        let query = build_list_query(Some(&params));
        assert_eq!(keys(&query), vec!["inStock"]);
        assert_eq!(query.get("inStock"), Some("false"));
    }

    #[test]
    fn test_list_query_passes_unknown_keys_through() {
        let params = SearchParams::new()
            .with_pagination(PaginationParams::new(1, 20))
            .with_filter("x-anything", "goes")
            .with_filter("page", 9);

        let query = build_list_query(Some(&params));
        assert_eq!(query.get("x-anything"), Some("goes"));
        assert_eq!(query.get("page"), Some("9"));
        assert_eq!(query.len(), 3);
    }

    #[test]
    fn test_list_query_pagination_without_sort() {
        let params = SearchParams::new().with_pagination(PaginationParams::new(1, 20));
        let query = build_list_query(Some(&params));
        assert_eq!(keys(&query), vec!["page", "limit"]);
    }

    #[test]
    fn test_search_query_price_range_and_sort() {
        let filter = BookFilter::new().with_price_range(Some(10.0), Some(50.0));
        let sort = BookSortOption::new(SortField::Price, SortDirection::Asc);

        let query = build_search_query(&filter, Some(&sort), 2, 5);
        assert_eq!(
            query.iter().collect::<Vec<_>>(),
            vec![
                ("page", "2"),
                ("limit", "5"),
                ("minPrice", "10"),
                ("maxPrice", "50"),
                ("sortBy", "price"),
                ("sortOrder", "asc"),
            ]
        );
    }

    #[test]
    fn test_search_query_maps_every_filter_field() {
        let filter = BookFilter::new()
            .with_category("fiction")
            .with_price_range(Some(0.0), Some(19.99))
            .with_author("Le Guin")
            .with_min_rating(4.0)
            .with_in_stock(true)
            .with_search_term("earthsea");

        let query = build_search_query(&filter, None, 1, 20);
        assert_eq!(query.get("category"), Some("fiction"));
        assert_eq!(query.get("minPrice"), Some("0"));
        assert_eq!(query.get("maxPrice"), Some("19.99"));
        assert_eq!(query.get("author"), Some("Le Guin"));
        assert_eq!(query.get("rating"), Some("4"));
        assert_eq!(query.get("inStock"), Some("true"));
        assert_eq!(query.get("search"), Some("earthsea"));
        assert!(!query.contains("sortBy"));
        assert!(!query.contains("searchTerm"));
    }

    #[test]
    fn test_search_query_emits_only_defined_fields() {
        let cases = [
            (BookFilter::new(), vec!["page", "limit"]),
            (BookFilter::new().with_in_stock(false), vec!["page", "limit", "inStock"]),
            (BookFilter::new().with_author(""), vec!["page", "limit"]),
            (
                BookFilter::new().with_min_rating(0.0).with_search_term("  "),
                vec!["page", "limit", "rating", "search"],
            ),
        ];

        for (filter, expected) in cases {
            let query = build_search_query(&filter, None, 1, 20);
            assert_eq!(keys(&query), expected, "filter: {:?}", filter);
        }
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let filter = BookFilter::new().with_search_term("  dune ");
        let query = build_search_query(&filter, None, 1, 20);
        assert_eq!(query.get("search"), Some("  dune "));
    }

    #[test]
    fn test_category_and_limit_queries() {
        let query = build_category_query("fiction", 3, 12);
        assert_eq!(query.to_query_string(), "category=fiction&page=3&limit=12");
        assert_eq!(build_limit_query(8).to_query_string(), "limit=8");
    }
}
