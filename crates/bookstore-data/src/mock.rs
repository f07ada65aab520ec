//! In-memory transport for tests.
//!
//! Replies are queued ahead of time and served in order; every request is
//! recorded so tests can assert on what went over the wire.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::request::Request;
use crate::response::Response;
use crate::transport::Transport;
use crate::FetchError;

#[derive(Debug)]
enum MockReply {
    Response(Response),
    Error(FetchError),
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    requests: Vec<Request>,
    delay: Option<Duration>,
}

/// Transport that replays queued responses and records requests.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_response(Response::json_body(status, &body))
    }

    /// Queue a raw response.
    pub fn push_response(&self, response: Response) -> &Self {
        self.state().replies.push_back(MockReply::Response(response));
        self
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: FetchError) -> &Self {
        self.state().replies.push_back(MockReply::Error(error));
        self
    }

    /// Delay every reply by `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state().delay = Some(delay);
        self
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<Request> {
        self.state().requests.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<Request> {
        self.state().requests.last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Replies still queued.
    pub fn pending_replies(&self) -> usize {
        self.state().replies.len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let delay = {
            let mut state = self.state();
            state.requests.push(request);
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.state().replies.pop_front() {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(FetchError::Request("no mock reply queued".to_string())),
        }
    }
}
