//! HTTP-specific error types for the panel SDK.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the panel
//! - [`HttpError`]: Unified error type encompassing all transport failures
//!
//! # Example
//!
//! ```rust,ignore
//! use pterodactyl_api::clients::{HttpError, StatusKind};
//!
//! match transport.request(request).await {
//!     Ok(body) => println!("Body: {}", body),
//!     Err(HttpError::Response(e)) if e.status_kind() == StatusKind::Unauthorised => {
//!         println!("Check the API key");
//!     }
//!     Err(e) => println!("Request failed: {}", e),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// Classification of a non-2xx status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// 400: the panel rejected the request.
    BadRequest,
    /// 401: the API key was missing or rejected.
    Unauthorised,
    /// 404: the requested object does not exist.
    NotFound,
    /// 422: the panel could not process the supplied entity.
    UnprocessableEntity,
    /// 500: the panel failed while processing the request.
    InternalServer,
    /// 502: a gateway in front of the panel failed.
    BadGateway,
    /// Any other non-successful status.
    Other,
}

impl StatusKind {
    /// Classifies an HTTP status code.
    #[must_use]
    pub const fn from_code(code: u16) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorised,
            404 => Self::NotFound,
            422 => Self::UnprocessableEntity,
            500 => Self::InternalServer,
            502 => Self::BadGateway,
            _ => Self::Other,
        }
    }
}

/// Error returned when the panel answers with a non-successful status.
///
/// The body is kept as decoded JSON when possible, otherwise as a JSON
/// string holding the raw text.
///
/// # Example
///
/// ```rust
/// use pterodactyl_api::clients::{HttpResponseError, StatusKind};
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 422,
///     body: json!({"errors": [{"code": "ValidationException"}]}),
/// };
///
/// assert_eq!(error.status_kind(), StatusKind::UnprocessableEntity);
/// assert!(error.to_string().contains("ValidationException"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response body.
    pub body: serde_json::Value,
}

impl HttpResponseError {
    /// Returns the classification of this error's status code.
    #[must_use]
    pub const fn status_kind(&self) -> StatusKind {
        StatusKind::from_code(self.code)
    }

    fn pretty_body(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}

impl fmt::Display for HttpResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_kind() {
            StatusKind::BadRequest => write!(
                f,
                "Request is invalid. Panel responded with:\n{}",
                self.pretty_body()
            ),
            StatusKind::Unauthorised => f.write_str(
                "This action is unauthorised. Panel responded with '401 Unauthorized'.",
            ),
            StatusKind::NotFound => write!(
                f,
                "Requested object was not found. Panel responded with:\n{}",
                self.pretty_body()
            ),
            StatusKind::UnprocessableEntity => write!(
                f,
                "Panel was unable to process supplied entity, responded with:\n{}",
                self.pretty_body()
            ),
            StatusKind::InternalServer => write!(
                f,
                "Panel failed to process request, responded with:\n{}",
                self.pretty_body()
            ),
            StatusKind::BadGateway => write!(
                f,
                "Bad gateway, panel responded with:\n{}",
                self.pretty_body()
            ),
            StatusKind::Other => write!(
                f,
                "Panel responded with status {}:\n{}",
                self.code,
                self.pretty_body()
            ),
        }
    }
}

impl std::error::Error for HttpResponseError {}

/// Unified error type for all transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The panel answered with a non-2xx status code.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A successful response carried a body that is not valid JSON.
    #[error("Failed to decode panel response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    /// Returns the HTTP status code if the panel answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_kind_mapping() {
        assert_eq!(StatusKind::from_code(400), StatusKind::BadRequest);
        assert_eq!(StatusKind::from_code(401), StatusKind::Unauthorised);
        assert_eq!(StatusKind::from_code(404), StatusKind::NotFound);
        assert_eq!(StatusKind::from_code(422), StatusKind::UnprocessableEntity);
        assert_eq!(StatusKind::from_code(500), StatusKind::InternalServer);
        assert_eq!(StatusKind::from_code(502), StatusKind::BadGateway);
        assert_eq!(StatusKind::from_code(418), StatusKind::Other);
    }

    #[test]
    fn test_unauthorised_message_omits_body() {
        let error = HttpResponseError {
            code: 401,
            body: json!({"errors": ["secret detail"]}),
        };
        let message = error.to_string();
        assert!(message.contains("401 Unauthorized"));
        assert!(!message.contains("secret detail"));
    }

    #[test]
    fn test_bad_request_message_includes_pretty_body() {
        let error = HttpResponseError {
            code: 400,
            body: json!({"error": "bad"}),
        };
        let message = error.to_string();
        assert!(message.starts_with("Request is invalid."));
        assert!(message.contains("\"error\": \"bad\""));
    }

    #[test]
    fn test_other_status_message_includes_code() {
        let error = HttpResponseError {
            code: 409,
            body: json!("conflict"),
        };
        assert!(error.to_string().contains("409"));
    }

    #[test]
    fn test_http_error_status() {
        let error = HttpError::from(HttpResponseError {
            code: 500,
            body: json!({}),
        });
        assert_eq!(error.status(), Some(500));

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(HttpError::from(decode).status(), None);
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let error: &dyn std::error::Error = &HttpResponseError {
            code: 400,
            body: json!(null),
        };
        let _ = error;
    }
}
