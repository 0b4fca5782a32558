//! User resource.

use chrono::{DateTime, Utc};

use crate::rest::resource::panel_resource;
use crate::rest::Fields;

panel_resource! {
    /// A panel user account.
    User => UserAttributes {
        /// User ID.
        id: u64,
        /// Identifier in an external system.
        external_id: String,
        /// User UUID.
        uuid: String,
        /// Login name.
        username: String,
        /// Email address.
        email: String,
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
        /// Interface language code.
        language: String,
        /// Whether the user is a panel administrator (application API).
        root_admin: bool,
        /// Whether the user is a panel administrator (client API).
        admin: bool,
        /// Whether two-factor authentication is enabled.
        two_factor as "2fa": bool,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Included relations (`servers`).
        relationships: Fields,
    }
}
