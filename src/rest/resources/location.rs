//! Location resource.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;

panel_resource! {
    /// A location grouping one or more nodes.
    ///
    /// Only the application API returns locations.
    Location => LocationAttributes {
        /// Location ID.
        id: u64,
        /// Short identifier, e.g. `eu.fra`.
        short: String,
        /// Long description.
        long: String,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Included relations (`nodes`, `servers`).
        relationships: crate::rest::Fields,
    }
}
