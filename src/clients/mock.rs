//! In-memory transport for tests.
//!
//! [`MockTransport`] records every request it receives and answers from a
//! queue of canned responses, so resource behaviour can be asserted without
//! any network traffic.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pterodactyl_api::clients::mock::MockTransport;
//! use serde_json::json;
//!
//! let mock = Arc::new(MockTransport::new());
//! mock.push_response(json!({"object": "server", "attributes": {"id": 1}}));
//! assert_eq!(mock.request_count(), 0);
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::clients::{HttpError, HttpRequest, Transport};

/// A [`Transport`] that records requests and replays queued responses.
///
/// When the queue is empty every request is answered with `null`, which is
/// what the panel's empty confirmation bodies decode to.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<Value, HttpError>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Creates a mock with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    pub fn push_response(&self, body: Value) {
        lock(&self.responses).push_back(Ok(body));
    }

    /// Queues a failure.
    pub fn push_error(&self, error: HttpError) {
        lock(&self.responses).push_back(Err(error));
    }

    /// Returns the number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Returns a copy of every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.requests).last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(&self, request: HttpRequest) -> Result<Value, HttpError> {
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().unwrap_or(Ok(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;
    use tokio_test::block_on;

    #[test]
    fn test_records_requests_in_order() {
        let mock = MockTransport::new();
        block_on(mock.request(HttpRequest::get("/a"))).unwrap();
        block_on(mock.request(HttpRequest::get("/b"))).unwrap();

        let paths: Vec<String> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
        assert_eq!(mock.last_request().unwrap().path, "/b");
    }

    #[test]
    fn test_replays_queued_responses_then_null() {
        let mock = MockTransport::new();
        mock.push_response(json!({"ok": true}));

        assert_eq!(
            block_on(mock.request(HttpRequest::get("/x"))).unwrap(),
            json!({"ok": true})
        );
        assert_eq!(block_on(mock.request(HttpRequest::get("/x"))).unwrap(), Value::Null);
    }

    #[test]
    fn test_replays_queued_errors() {
        let mock = MockTransport::new();
        mock.push_error(HttpError::Response(HttpResponseError {
            code: 404,
            body: json!({}),
        }));

        let result = block_on(mock.request(HttpRequest::get("/missing")));
        assert!(matches!(result, Err(HttpError::Response(e)) if e.code == 404));
    }
}
