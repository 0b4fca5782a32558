//! API surface selection.
//!
//! The panel exposes two API personalities under different base paths and
//! with different key types. Every transport and every parsed resource is
//! bound to exactly one of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The panel API surface a transport or resource is bound to.
///
/// # Example
///
/// ```rust
/// use pterodactyl_api::ApiSurface;
///
/// assert_eq!(ApiSurface::Application.base_path(), "/api/application");
/// assert_eq!("client".parse::<ApiSurface>().unwrap(), ApiSurface::Client);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSurface {
    /// Administrative API (`/api/application`).
    Application,
    /// End-user API (`/api/client`).
    Client,
}

impl ApiSurface {
    /// Returns the path segment naming this surface.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Client => "client",
        }
    }

    /// Returns the base path requests on this surface are sent under.
    #[must_use]
    pub const fn base_path(&self) -> &'static str {
        match self {
            Self::Application => "/api/application",
            Self::Client => "/api/client",
        }
    }
}

impl fmt::Display for ApiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiSurface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(Self::Application),
            "client" => Ok(Self::Client),
            other => Err(format!("unknown API surface '{other}'")),
        }
    }
}
