//! Catalog data access for the bookstore.
//!
//! This crate provides:
//! - `FetchClient` - request builder bound to a base URL, with per-attempt
//!   timeout and an explicit retry policy
//! - `Transport` - the seam to the network (`HttpTransport` over reqwest)
//! - `query` - the query builder for list/search/filter/sort/pagination
//! - `Subject` - single-slot observable store for last-fetched lists
//! - `BookService` - one method per catalog operation
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore_data::BookService;
//! use bookstore_models::prelude::*;
//!
//! let service = BookService::from_config(&ApiConfig::default())?;
//!
//! let featured = service.get_featured_books(Some(8)).await?;
//! let results = service
//!     .search(
//!         &BookFilter::new().with_price_range(Some(10.0), Some(50.0)),
//!         Some(&BookSortOption::asc(SortField::Price)),
//!         None,
//!         None,
//!     )
//!     .await?;
//! ```

mod error;
mod policy;
mod request;
mod response;
mod retry;
mod service;
mod subject;
mod timeout;
mod transport;

pub mod query;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::collections::HashMap;
use std::sync::Arc;

use bookstore_models::config::ApiConfig;
use serde::Serialize;
use tracing::{debug, warn};

pub use error::FetchError;
pub use policy::FetchPolicy;
pub use query::QueryParams;
pub use request::{Method, Request};
pub use response::Response;
pub use retry::{BackoffStrategy, RetryPolicy};
pub use service::{
    BookService, Operation, PayloadFields, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT,
    DEFAULT_RELATED_LIMIT, DEFAULT_SHOWCASE_LIMIT,
};
pub use subject::Subject;
pub use timeout::TimeoutConfig;
pub use transport::{HttpTransport, Transport};

/// HTTP client for catalog requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
    policy: FetchPolicy,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client over the given transport with the default policy.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            transport,
            policy: FetchPolicy::default(),
        }
    }

    /// Create an HTTP client for the endpoint and timings in `config`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        let policy = FetchPolicy::from_config(config);
        let transport = HttpTransport::new(&policy.timeout)?;
        Ok(Self::new(Arc::new(transport))
            .with_base_url(config.base_url.clone())
            .with_policy(policy))
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the timeout and retry policy.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Put, url)
    }

    /// Create a PATCH request.
    pub fn patch(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Patch, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    ///
    /// Relative paths are appended to the base URL; absolute URLs are used as-is.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut request = Request::new(method, full_url).accept("application/json");
        for (key, value) in &self.default_headers {
            request = request.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self,
            request,
        }
    }

    /// Send a request, applying the timeout and retry policy.
    ///
    /// Non-2xx responses become [`FetchError::Http`]. Only idempotent methods
    /// are retried.
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            match self.attempt(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(err)
                    if request.method.is_idempotent()
                        && err.is_retryable_by(&self.policy.retry, attempt) =>
                {
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    attempt += 1;
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        attempt,
                        ?delay,
                        error = %err,
                        "retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn attempt(&self, request: Request) -> Result<Response, FetchError> {
        debug!(
            method = %request.method,
            url = %request.url,
            query = %request.query.to_query_string(),
            "sending request"
        );

        let response = match self.policy.timeout.total_limit() {
            Some(total) => tokio::time::timeout(total, self.transport.send(request))
                .await
                .map_err(|_| FetchError::Timeout(total))??,
            None => self.transport.send(request).await?,
        };

        response.error_for_status()
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    request: Request,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// Set the query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.request = self.request.query(query);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    /// The request as it would be sent.
    pub fn build(self) -> Request {
        self.request
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.execute(self.request).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{BookService, FetchClient, FetchError, FetchPolicy, Subject};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;
    use std::time::Duration;

    fn client(mock: &MockTransport) -> FetchClient {
        FetchClient::new(Arc::new(mock.clone())).with_base_url("http://api.test/books/")
    }

    fn retrying(attempts: u32) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::default(),
            RetryPolicy::new(attempts).with_backoff(BackoffStrategy::None),
        )
    }

    #[test]
    fn test_relative_path_joined_to_base() {
        let mock = MockTransport::new();
        let client = client(&mock);

        assert_eq!(client.get("/search").build().url, "http://api.test/books/search");
        assert_eq!(client.get("").build().url, "http://api.test/books");
        assert_eq!(
            client.get("https://elsewhere.test/x").build().url,
            "https://elsewhere.test/x"
        );
    }

    #[test]
    fn test_default_headers_applied() {
        let mock = MockTransport::new();
        let request = client(&mock)
            .with_default_header("X-Client", "bookstore")
            .get("/1")
            .build();

        assert_eq!(request.header_value("x-client"), Some("bookstore"));
        assert_eq!(request.header_value("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_http_error_surfaces() {
        let mock = MockTransport::new();
        mock.push_json(404, json!({ "message": "nope", "code": "NOT_FOUND" }));

        let err = client(&mock).get("/missing").send().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_get_retries_server_errors() {
        let mock = MockTransport::new();
        mock.push_json(503, json!({}))
            .push_json(503, json!({}))
            .push_json(200, json!({ "ok": true }));

        let response = client(&mock)
            .with_policy(retrying(2))
            .get("/1")
            .send()
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_retry_budget_exhausted() {
        let mock = MockTransport::new();
        for _ in 0..4 {
            mock.push_json(500, json!({}));
        }

        let err = client(&mock)
            .with_policy(retrying(2))
            .get("/1")
            .send()
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(mock.request_count(), 3);
        assert_eq!(mock.pending_replies(), 1);
    }

    #[tokio::test]
    async fn test_post_is_never_retried() {
        let mock = MockTransport::new();
        mock.push_json(503, json!({})).push_json(200, json!({}));

        let err = client(&mock)
            .with_policy(retrying(3))
            .post("")
            .json(&json!({ "title": "Dune" }))
            .unwrap()
            .send()
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let mock = MockTransport::new();
        mock.push_json(400, json!({})).push_json(200, json!({}));

        let result = client(&mock).with_policy(retrying(3)).get("/1").send().await;
        assert!(result.is_err());
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_connection_errors_are_retried() {
        let mock = MockTransport::new();
        mock.push_error(FetchError::Request("connection refused".into()))
            .push_json(200, json!({}));

        let result = client(&mock).with_policy(retrying(1)).get("/1").send().await;
        assert!(result.is_ok());
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_slow_transport_times_out() {
        let mock = MockTransport::new().with_delay(Duration::from_secs(5));
        mock.push_json(200, json!({}));

        let policy = FetchPolicy::new(
            TimeoutConfig::new(Duration::from_millis(10), Duration::from_millis(50)),
            RetryPolicy::none(),
        );
        let err = client(&mock)
            .with_policy(policy)
            .get("/1")
            .send()
            .await
            .unwrap_err();

        assert_eq!(err, FetchError::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_zero_timeout_waits_for_slow_transport() {
        let mock = MockTransport::new().with_delay(Duration::from_millis(30));
        mock.push_json(200, json!({ "ok": true }));

        let policy = FetchPolicy::new(
            TimeoutConfig::from_total(Duration::ZERO),
            RetryPolicy::none(),
        );
        let response = client(&mock)
            .with_policy(policy)
            .get("/1")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status, 200);
    }
}
