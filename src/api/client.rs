//! The end-user API facade.

use std::sync::Arc;

use crate::api::query::include_params;
use crate::api::ListQuery;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, SharedTransport};
use crate::config::{ApiSurface, PanelConfig};
use crate::rest::resources::Server;
use crate::rest::{request_list, request_resource, ResourceError, ResourceList};

const SURFACE: ApiSurface = ApiSurface::Client;

/// Entry point for the client (end-user) API.
///
/// Servers are addressed by their short `identifier` rather than by ID.
///
/// ```rust,ignore
/// let api = ClientApi::new(&config)?;
/// let server = api.server("1a7ce997", &[]).await?;
/// println!("{:?}", server.resources().await?.current_state);
/// ```
#[derive(Clone, Debug)]
pub struct ClientApi {
    transport: SharedTransport,
}

impl ClientApi {
    /// Creates a facade sending requests to `<panel>/api/client`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &PanelConfig) -> Result<Self, HttpError> {
        Ok(Self::with_transport(Arc::new(HttpClient::new(config, SURFACE)?)))
    }

    /// Creates a facade over an existing transport.
    #[must_use]
    pub fn with_transport(transport: SharedTransport) -> Self {
        Self { transport }
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &SharedTransport {
        &self.transport
    }

    /// Lists the servers the API key's user can access.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn servers(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, "/")
            .query(query.to_params())
            .build();
        request_list(&self.transport, SURFACE, request).await
    }

    /// Fetches a server by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn server(&self, identifier: &str, includes: &[&str]) -> Result<Server, ResourceError> {
        let identifier = urlencoding::encode(identifier);
        let request = HttpRequest::builder(HttpMethod::Get, format!("/servers/{identifier}"))
            .query(include_params(includes))
            .build();
        request_resource(&self.transport, SURFACE, request).await
    }
}
