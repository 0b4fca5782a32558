//! Nest resource.

use chrono::{DateTime, Utc};

use crate::api::query::include_params;
use crate::api::ListQuery;
use crate::clients::{HttpMethod, HttpRequest};
use crate::config::ApiSurface;
use crate::rest::resource::panel_resource;
use crate::rest::resources::Egg;
use crate::rest::{request_list, request_resource, Fields, ResourceError, ResourceList};

panel_resource! {
    /// A nest grouping related eggs.
    Nest => NestAttributes {
        /// Nest ID.
        id: u64,
        /// Nest UUID.
        uuid: String,
        /// Author email.
        author: String,
        /// Display name.
        name: String,
        /// Description.
        description: String,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Included relations (`eggs`, `servers`).
        relationships: Fields,
    }
}

impl Nest {
    fn require_id(&self) -> Result<u64, ResourceError> {
        self.attributes
            .id
            .ok_or_else(|| ResourceError::invalid_payload("nest has no 'id' attribute"))
    }

    /// Lists the eggs in this nest.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport or parse error.
    pub async fn eggs(&self, query: &ListQuery) -> Result<ResourceList, ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        let id = self.require_id()?;

        let request = HttpRequest::builder(HttpMethod::Get, format!("/nests/{id}/eggs"))
            .query(query.to_params())
            .build();
        request_list(self.core.transport(), self.core.surface(), request).await
    }

    /// Fetches one egg of this nest.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport or parse error.
    pub async fn egg(&self, egg_id: u64, includes: &[&str]) -> Result<Egg, ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        let id = self.require_id()?;

        let request = HttpRequest::builder(HttpMethod::Get, format!("/nests/{id}/eggs/{egg_id}"))
            .query(include_params(includes))
            .build();
        request_resource(self.core.transport(), self.core.surface(), request).await
    }
}
