//! The administrative API facade.

use std::sync::Arc;

use crate::api::query::include_params;
use crate::api::ListQuery;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, SharedTransport};
use crate::config::{ApiSurface, PanelConfig};
use crate::rest::resources::{Location, Nest, Node, Server, User};
use crate::rest::{request_list, request_resource, PanelResource, ResourceError, ResourceList};

const SURFACE: ApiSurface = ApiSurface::Application;

/// Entry point for the application (administrative) API.
///
/// # Example
///
/// ```rust,ignore
/// use pterodactyl_api::{ApplicationApi, ListQuery, PanelConfig};
///
/// let api = ApplicationApi::new(&PanelConfig::from_env()?)?;
///
/// let servers = api.servers(&ListQuery::new().include("allocations")).await?;
/// for server in servers.resources::<Server>() {
///     println!("{:?}", server.name);
/// }
///
/// let node = api.node(1, &["location"]).await?;
/// ```
#[derive(Clone, Debug)]
pub struct ApplicationApi {
    transport: SharedTransport,
}

impl ApplicationApi {
    /// Creates a facade sending requests to `<panel>/api/application`.
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

    async fn list(&self, path: &str, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query.to_params())
            .build();
        request_list(&self.transport, SURFACE, request).await
    }

    async fn fetch<T: PanelResource>(
        &self,
        path: String,
        includes: &[&str],
    ) -> Result<T, ResourceError> {
        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(include_params(includes))
            .build();
        request_resource(&self.transport, SURFACE, request).await
    }

    /// Lists servers.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn servers(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.list("/servers", query).await
    }

    /// Fetches a server by ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn server(&self, id: u64, includes: &[&str]) -> Result<Server, ResourceError> {
        self.fetch(format!("/servers/{id}"), includes).await
    }

    /// Fetches a server by its external ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn external(
        &self,
        external_id: &str,
        includes: &[&str],
    ) -> Result<Server, ResourceError> {
        let external_id = urlencoding::encode(external_id);
        self.fetch(format!("/servers/external/{external_id}"), includes)
            .await
    }

    /// Lists nodes.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn nodes(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.list("/nodes", query).await
    }

    /// Fetches a node by ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn node(&self, id: u64, includes: &[&str]) -> Result<Node, ResourceError> {
        self.fetch(format!("/nodes/{id}"), includes).await
    }

    /// Lists locations.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn locations(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.list("/locations", query).await
    }

    /// Fetches a location by ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn location(&self, id: u64, includes: &[&str]) -> Result<Location, ResourceError> {
        self.fetch(format!("/locations/{id}"), includes).await
    }

    /// Lists nests.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn nests(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.list("/nests", query).await
    }

    /// Fetches a nest by ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn nest(&self, id: u64, includes: &[&str]) -> Result<Nest, ResourceError> {
        self.fetch(format!("/nests/{id}"), includes).await
    }

    /// Lists users.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn users(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.list("/users", query).await
    }

    /// Fetches a user by ID.
    ///
    /// # Errors
    ///
    /// Returns any transport or parse error.
    pub async fn user(&self, id: u64, includes: &[&str]) -> Result<User, ResourceError> {
        self.fetch(format!("/users/{id}"), includes).await
    }
}
