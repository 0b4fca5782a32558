//! Subuser resource.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;

panel_resource! {
    /// A user granted scoped access to a server.
    Subuser => SubuserAttributes {
        /// Subuser UUID.
        uuid: String,
        /// Login name.
        username: String,
        /// Email address.
        email: String,
        /// Avatar URL.
        image: String,
        /// Whether two-factor authentication is enabled.
        two_factor_enabled as "2fa_enabled": bool,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Granted permission keys, e.g. `control.console`.
        permissions: Vec<String>,
    }
}

impl Subuser {
    /// Returns `true` if `permission` was granted.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|granted| granted.iter().any(|p| p == permission))
    }
}
