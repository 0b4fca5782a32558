//! Allocation resource.

use crate::rest::resource::panel_resource;
use crate::rest::Fields;

panel_resource! {
    /// An IP and port pair on a node.
    Allocation => AllocationAttributes {
        /// Allocation ID.
        id: u64,
        /// Bound IP address.
        ip: String,
        /// Display alias (application API).
        alias: String,
        /// Display alias (client API).
        ip_alias: String,
        /// Port number.
        port: u64,
        /// Free-form notes.
        notes: String,
        /// Whether a server uses this allocation.
        assigned: bool,
        /// Whether this is the server's primary allocation.
        is_default: bool,
        /// Included relations (`node`, `server`).
        relationships: Fields,
    }
}

impl Allocation {
    /// Returns the `ip:port` address, preferring the alias when set.
    #[must_use]
    pub fn address(&self) -> Option<String> {
        let host = self
            .alias
            .as_deref()
            .or(self.ip_alias.as_deref())
            .or(self.ip.as_deref())?;
        Some(format!("{host}:{}", self.port?))
    }
}
