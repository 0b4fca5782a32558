//! Startup variable resources.
//!
//! The panel reports startup variables under two tags: `egg_variable` for
//! the definition an egg declares, and `server_variable` for the same
//! definition together with the value a server has set.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;

panel_resource! {
    /// A startup variable declared by an egg.
    EggVariable => EggVariableAttributes {
        /// Variable ID.
        id: u64,
        /// Owning egg ID.
        egg_id: u64,
        /// Display name.
        name: String,
        /// Description.
        description: String,
        /// Environment variable name.
        env_variable: String,
        /// Default value.
        default_value: String,
        /// Value set on the server (client API).
        server_value: String,
        /// Whether the user may edit the value (client API).
        is_editable: bool,
        /// Whether users can see the variable.
        user_viewable: bool,
        /// Whether users can edit the variable.
        user_editable: bool,
        /// Validation rules, pipe-separated.
        rules: String,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Last update time.
        updated_at: DateTime<Utc>,
    }
}

panel_resource! {
    /// A startup variable as configured on a server.
    ServerVariable => ServerVariableAttributes {
        /// Variable ID.
        id: u64,
        /// Owning egg ID.
        egg_id: u64,
        /// Display name.
        name: String,
        /// Description.
        description: String,
        /// Environment variable name.
        env_variable: String,
        /// Default value.
        default_value: String,
        /// Value set on the server.
        server_value: String,
        /// Whether the user may edit the value.
        is_editable: bool,
        /// Whether users can see the variable.
        user_viewable: bool,
        /// Whether users can edit the variable.
        user_editable: bool,
        /// Validation rules, pipe-separated.
        rules: String,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Last update time.
        updated_at: DateTime<Utc>,
    }
}

impl ServerVariable {
    /// Returns the server value, falling back to the default.
    #[must_use]
    pub fn effective_value(&self) -> Option<&str> {
        self.server_value
            .as_deref()
            .or(self.default_value.as_deref())
    }
}
