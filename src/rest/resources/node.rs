//! Node resource.
//!
//! Nodes are the machines running the panel daemon. Both operations are
//! application-only:
//!
//! ```rust,ignore
//! let node = api.node(1, &["location"]).await?;
//! let config = node.configuration().await?;
//! let allocations = node.allocations(&ListQuery::new().page(2)).await?;
//! ```

use chrono::{DateTime, Utc};

use crate::api::ListQuery;
use crate::clients::{HttpMethod, HttpRequest};
use crate::config::ApiSurface;
use crate::rest::resource::panel_resource;
use crate::rest::{parse, request_list, Fields, ParsedValue, ResourceError, ResourceList};

panel_resource! {
    /// A daemon node.
    Node => NodeAttributes {
        /// Node ID.
        id: u64,
        /// Node UUID.
        uuid: String,
        /// Whether the node is public for auto-deployment.
        public: bool,
        /// Display name.
        name: String,
        /// Description.
        description: String,
        /// Owning location ID.
        location_id: u64,
        /// Fully qualified domain name.
        fqdn: String,
        /// `http` or `https`.
        scheme: String,
        /// Whether the daemon sits behind a proxy.
        behind_proxy: bool,
        /// Whether the node is in maintenance mode.
        maintenance_mode: bool,
        /// Total memory in MiB.
        memory: u64,
        /// Memory overallocation percentage.
        memory_overallocate: i64,
        /// Total disk in MiB.
        disk: u64,
        /// Disk overallocation percentage.
        disk_overallocate: i64,
        /// Maximum upload size in MiB.
        upload_size: u64,
        /// Daemon API port.
        daemon_listen: u64,
        /// Daemon SFTP port.
        daemon_sftp: u64,
        /// Daemon data directory.
        daemon_base: String,
        /// Memory and disk already allocated to servers.
        allocated_resources: Fields,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Included relations (`allocations`, `location`, `servers`).
        relationships: Fields,
    }
}

impl Node {
    fn require_id(&self) -> Result<u64, ResourceError> {
        self.attributes
            .id
            .ok_or_else(|| ResourceError::invalid_payload("node has no 'id' attribute"))
    }

    /// Fetches the daemon configuration for this node.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport or parse error.
    pub async fn configuration(&self) -> Result<ParsedValue, ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        let id = self.require_id()?;

        let body = self
            .core
            .send(HttpRequest::get(format!("/nodes/{id}/configuration")))
            .await?;
        parse(self.core.transport(), self.core.surface(), &body)
    }

    /// Lists the allocations of this node.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport or parse error.
    pub async fn allocations(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        let id = self.require_id()?;

        let request = HttpRequest::builder(HttpMethod::Get, format!("/nodes/{id}/allocations"))
            .query(query.to_params())
            .build();
        request_list(self.core.transport(), self.core.surface(), request).await
    }
}
