//! Transports that carry a [`Request`] to the network.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::trace;

use crate::request::{Method, Request};
use crate::response::Response;
use crate::timeout::TimeoutConfig;
use crate::FetchError;

/// Sends one request and returns the raw response.
///
/// Implementations do not interpret status codes and do not retry; the
/// [`crate::FetchClient`] handles both.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the connect timeout from `timeout`.
    ///
    /// The total timeout is enforced per attempt by the fetch client.
    pub fn new(timeout: &TimeoutConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("bookstore/", env!("CARGO_PKG_VERSION")));
        if let Some(connect) = timeout.connect_limit() {
            builder = builder.connect_timeout(connect);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let url = request.full_url()?;
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url.clone());

        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        trace!(%url, status, bytes = body.len(), "response received");
        Ok(Response::new(status, headers, body.to_vec()))
    }
}
