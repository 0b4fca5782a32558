//! Database resource.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;
use crate::rest::Fields;

panel_resource! {
    /// A database attached to a server.
    ///
    /// The client API identifies databases by a hashed string ID, the
    /// application API by a number, so `id` is kept untyped.
    Database => DatabaseAttributes {
        /// Database ID.
        id: crate::rest::ParsedValue,
        /// Owning server ID.
        server: u64,
        /// Database host ID (application API).
        host: u64,
        /// Database name (application API).
        database: String,
        /// Database name (client API).
        name: String,
        /// Login user.
        username: String,
        /// Allowed remote host pattern.
        remote: String,
        /// Connection limit.
        max_connections: u64,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Included relations (`password`, `host`).
        relationships: Fields,
    }
}
