//! Error types for parsing, resource actions and validation.
//!
//! # Error Handling
//!
//! [`ResourceError::is_local`] is `true` only for errors raised before a
//! request leaves the process. Parser and hydration errors can follow a
//! mutation the panel has already applied.
//!
//! - [`ResourceError::UnknownResource`]: the parser met an `object` tag it has no type for
//! - [`ResourceError::IncorrectSurface`]: a resource action was called on the wrong API surface
//! - [`ResourceError::FieldRequired`], [`ResourceError::FieldNotPresent`],
//!   [`ResourceError::FieldTypeMismatch`]: validation of mutator input or hydrated attributes
//! - [`ResourceError::InvalidPowerSignal`]: a power signal outside start/stop/restart/kill
//! - [`ResourceError::InvalidPayload`]: the panel answered with an unexpected shape
//!
//! # Example
//!
//! ```rust,ignore
//! use pterodactyl_api::rest::ResourceError;
//!
//! match server.power("jump").await {
//!     Err(ResourceError::InvalidPowerSignal { signal }) => println!("bad signal {signal}"),
//!     Err(ResourceError::IncorrectSurface { expected, .. }) => println!("needs {expected} API"),
//!     Err(e) => println!("other error: {e}"),
//!     Ok(()) => {}
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::config::ApiSurface;

/// Error type for parsing and resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The payload named a resource type the SDK does not know.
    ///
    /// This signals a mismatch between the SDK and the panel version and is
    /// never silently skipped.
    #[error("Unknown resource, '{object}', if you are seeing this, please report it to the SDK maintainers.")]
    UnknownResource {
        /// The unrecognised `object` tag.
        object: String,
    },

    /// The operation is only available on a different API surface.
    #[error("This function is only allowed for API type '{expected}', but the resource is bound to '{actual}'.")]
    IncorrectSurface {
        /// The surface the operation requires.
        expected: ApiSurface,
        /// The surface the resource is bound to.
        actual: ApiSurface,
    },

    /// A required field was absent or empty.
    #[error("The field '{field}' is required, but was absent or empty.")]
    FieldRequired {
        /// Dotted path of the field.
        field: String,
    },

    /// A field that must be present (possibly empty) was absent.
    #[error("The field '{field}' should be present, but was absent.")]
    FieldNotPresent {
        /// Dotted path of the field.
        field: String,
    },

    /// A field held a value of the wrong type.
    #[error("The field '{field}' should be of type '{expected}'.")]
    FieldTypeMismatch {
        /// Dotted path of the field.
        field: String,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },

    /// A power signal outside the supported set.
    #[error("Invalid power signal, '{signal}', should be either 'start', 'stop', 'restart', or 'kill'.")]
    InvalidPowerSignal {
        /// The rejected signal.
        signal: String,
    },

    /// The panel answered with a payload of an unexpected shape.
    #[error("Unexpected panel payload: {reason}")]
    InvalidPayload {
        /// What was wrong with the payload.
        reason: String,
    },

    /// The transport failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    pub(crate) fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors raised before any request was sent.
    ///
    /// [`ResourceError::FieldTypeMismatch`] is not local: hydrating a
    /// response raises it too.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::IncorrectSurface { .. }
                | Self::InvalidPowerSignal { .. }
                | Self::FieldRequired { .. }
                | Self::FieldNotPresent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_unknown_resource_message_carries_tag() {
        let error = ResourceError::UnknownResource {
            object: "backup".to_string(),
        };
        assert!(error.to_string().contains("'backup'"));
    }

    #[test]
    fn test_incorrect_surface_message() {
        let error = ResourceError::IncorrectSurface {
            expected: ApiSurface::Client,
            actual: ApiSurface::Application,
        };
        let message = error.to_string();
        assert!(message.contains("'client'"));
        assert!(message.contains("'application'"));
    }

    #[test]
    fn test_field_messages() {
        let required = ResourceError::FieldRequired {
            field: "limits.memory".to_string(),
        };
        assert!(required.to_string().contains("limits.memory"));

        let mismatch = ResourceError::FieldTypeMismatch {
            field: "user".to_string(),
            expected: "number",
        };
        assert_eq!(
            mismatch.to_string(),
            "The field 'user' should be of type 'number'."
        );
    }

    #[test]
    fn test_invalid_power_signal_lists_options() {
        let error = ResourceError::InvalidPowerSignal {
            signal: "jump".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'jump'"));
        assert!(message.contains("'kill'"));
    }

    #[test]
    fn test_is_local() {
        assert!(ResourceError::FieldRequired {
            field: "name".to_string()
        }
        .is_local());

        let http = ResourceError::from(HttpError::Response(HttpResponseError {
            code: 500,
            body: serde_json::Value::Null,
        }));
        assert!(!http.is_local());

        assert!(!ResourceError::UnknownResource {
            object: "backup".to_string()
        }
        .is_local());
        assert!(!ResourceError::FieldTypeMismatch {
            field: "user".to_string(),
            expected: "number"
        }
        .is_local());
    }
}
