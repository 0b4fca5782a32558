//! The transport abstraction every facade and resource talks through.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::{HttpError, HttpRequest};

/// Issues authenticated requests against one API surface and returns the
/// decoded JSON body.
///
/// Implementations are shared behind an `Arc` by every resource parsed from
/// their responses, so they must be `Send + Sync`. [`HttpClient`] is the
/// production implementation; [`MockTransport`] records requests for tests.
///
/// [`HttpClient`]: crate::clients::HttpClient
/// [`MockTransport`]: crate::clients::mock::MockTransport
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the decoded response body.
    ///
    /// An empty successful body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Response`] for non-2xx statuses,
    /// [`HttpError::Network`] for connection failures and
    /// [`HttpError::Decode`] for malformed successful bodies.
    async fn request(&self, request: HttpRequest) -> Result<serde_json::Value, HttpError>;
}

/// Shared handle to a transport.
pub type SharedTransport = Arc<dyn Transport>;
