//! Transport layer for panel API communication.
//!
//! # Overview
//!
//! - [`Transport`]: The trait every facade and resource sends requests through
//! - [`HttpClient`]: The reqwest-backed transport bound to one API surface
//! - [`HttpRequest`]: A request to be sent to the panel
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`] / [`HttpResponseError`]: Transport failures
//! - [`mock::MockTransport`]: Recording test double
//!
//! # Retry Behavior
//!
//! Requests are never retried. A failed call surfaces immediately.

mod errors;
mod http_client;
mod http_request;
pub mod mock;
mod transport;

pub use errors::{HttpError, HttpResponseError, StatusKind};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use transport::{SharedTransport, Transport};
