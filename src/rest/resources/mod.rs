//! Typed panel resources and the discriminator registry.
//!
//! Every object in a panel payload names its type in the `object` key. The
//! registry maps each supported tag to a [`ResourceKind`] and builds the
//! matching [`Resource`] variant:
//!
//! | Tag               | Type               |
//! |-------------------|--------------------|
//! | `server`          | [`Server`]         |
//! | `allocation`      | [`Allocation`]     |
//! | `user`            | [`User`]           |
//! | `subuser`         | [`Subuser`]        |
//! | `nest`            | [`Nest`]           |
//! | `egg`             | [`Egg`]            |
//! | `server_variable` | [`ServerVariable`] |
//! | `location`        | [`Location`]       |
//! | `node`            | [`Node`]           |
//! | `database`        | [`Database`]       |
//! | `egg_variable`    | [`EggVariable`]    |
//! | `stats`           | [`Stats`]          |
//!
//! An unrecognised tag is a hard failure, see
//! [`ResourceError::UnknownResource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pterodactyl_api::rest::resources::{Resource, Server};
//!
//! let server: &Server = resource.downcast_ref().expect("a server");
//! match resource {
//!     Resource::Server(server) => println!("{:?}", server.identifier),
//!     other => println!("{}", other.kind()),
//! }
//! ```

mod allocation;
mod database;
mod egg;
mod location;
mod nest;
mod node;
mod server;
mod stats;
mod subuser;
mod user;
mod variable;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

pub use allocation::{Allocation, AllocationAttributes};
pub use database::{Database, DatabaseAttributes};
pub use egg::{Egg, EggAttributes};
pub use location::{Location, LocationAttributes};
pub use nest::{Nest, NestAttributes};
pub use node::{Node, NodeAttributes};
pub use server::{PowerSignal, Server, ServerAttributes, WebsocketCredentials};
pub use stats::{PowerState, ResourceUsage, Stats, StatsAttributes};
pub use subuser::{Subuser, SubuserAttributes};
pub use user::{User, UserAttributes};
pub use variable::{EggVariable, EggVariableAttributes, ServerVariable, ServerVariableAttributes};

use crate::clients::SharedTransport;
use crate::config::ApiSurface;
use crate::rest::{PanelResource, ResourceCore, ResourceError};

/// The closed set of resource types the panel returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `server`
    Server,
    /// `allocation`
    Allocation,
    /// `user`
    User,
    /// `subuser`
    Subuser,
    /// `nest`
    Nest,
    /// `egg`
    Egg,
    /// `server_variable`
    ServerVariable,
    /// `location`
    Location,
    /// `node`
    Node,
    /// `database`
    Database,
    /// `egg_variable`
    EggVariable,
    /// `stats`
    Stats,
}

impl ResourceKind {
    /// Every registered kind.
    pub const ALL: [Self; 12] = [
        Self::Server,
        Self::Allocation,
        Self::User,
        Self::Subuser,
        Self::Nest,
        Self::Egg,
        Self::ServerVariable,
        Self::Location,
        Self::Node,
        Self::Database,
        Self::EggVariable,
        Self::Stats,
    ];

    /// Returns the `object` tag for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Allocation => "allocation",
            Self::User => "user",
            Self::Subuser => "subuser",
            Self::Nest => "nest",
            Self::Egg => "egg",
            Self::ServerVariable => "server_variable",
            Self::Location => "location",
            Self::Node => "node",
            Self::Database => "database",
            Self::EggVariable => "egg_variable",
            Self::Stats => "stats",
        }
    }

    /// Looks up the kind registered for `tag`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| ResourceError::UnknownResource {
            object: s.to_string(),
        })
    }
}

/// A materialized resource of any registered type.
#[derive(Debug, Clone)]
pub enum Resource {
    /// A game server.
    Server(Server),
    /// A node allocation (IP and port).
    Allocation(Allocation),
    /// A panel user.
    User(User),
    /// A user granted access to a server.
    Subuser(Subuser),
    /// A nest of eggs.
    Nest(Nest),
    /// A server template.
    Egg(Egg),
    /// A startup variable as set on a server.
    ServerVariable(ServerVariable),
    /// A location grouping nodes.
    Location(Location),
    /// A daemon node.
    Node(Node),
    /// A server database.
    Database(Database),
    /// A startup variable as declared by an egg.
    EggVariable(EggVariable),
    /// Live server resource usage.
    Stats(Stats),
}

impl Resource {
    /// Returns the kind of this resource.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Server(_) => ResourceKind::Server,
            Self::Allocation(_) => ResourceKind::Allocation,
            Self::User(_) => ResourceKind::User,
            Self::Subuser(_) => ResourceKind::Subuser,
            Self::Nest(_) => ResourceKind::Nest,
            Self::Egg(_) => ResourceKind::Egg,
            Self::ServerVariable(_) => ResourceKind::ServerVariable,
            Self::Location(_) => ResourceKind::Location,
            Self::Node(_) => ResourceKind::Node,
            Self::Database(_) => ResourceKind::Database,
            Self::EggVariable(_) => ResourceKind::EggVariable,
            Self::Stats(_) => ResourceKind::Stats,
        }
    }

    /// Returns the shared resource state.
    #[must_use]
    pub fn core(&self) -> &ResourceCore {
        match self {
            Self::Server(r) => r.core(),
            Self::Allocation(r) => r.core(),
            Self::User(r) => r.core(),
            Self::Subuser(r) => r.core(),
            Self::Nest(r) => r.core(),
            Self::Egg(r) => r.core(),
            Self::ServerVariable(r) => r.core(),
            Self::Location(r) => r.core(),
            Self::Node(r) => r.core(),
            Self::Database(r) => r.core(),
            Self::EggVariable(r) => r.core(),
            Self::Stats(r) => r.core(),
        }
    }

    /// Borrows the resource as the concrete type `T`.
    #[must_use]
    pub fn downcast_ref<T: PanelResource>(&self) -> Option<&T> {
        T::from_resource_ref(self)
    }

    /// Unwraps the resource as the concrete type `T`.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if it is of another type.
    pub fn downcast<T: PanelResource>(self) -> Result<T, Self> {
        T::from_resource(self)
    }

    /// Converts the resource back into the panel's wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Server(r) => r.to_json(),
            Self::Allocation(r) => r.to_json(),
            Self::User(r) => r.to_json(),
            Self::Subuser(r) => r.to_json(),
            Self::Nest(r) => r.to_json(),
            Self::Egg(r) => r.to_json(),
            Self::ServerVariable(r) => r.to_json(),
            Self::Location(r) => r.to_json(),
            Self::Node(r) => r.to_json(),
            Self::Database(r) => r.to_json(),
            Self::EggVariable(r) => r.to_json(),
            Self::Stats(r) => r.to_json(),
        }
    }
}

/// Builds the resource registered for `kind` from `payload`.
///
/// # Errors
///
/// Returns any hydration error of the concrete type.
pub fn materialize(
    kind: ResourceKind,
    transport: &SharedTransport,
    surface: ApiSurface,
    payload: &Value,
) -> Result<Resource, ResourceError> {
    fn build<T: PanelResource>(
        transport: &SharedTransport,
        surface: ApiSurface,
        payload: &Value,
    ) -> Result<Resource, ResourceError> {
        T::from_payload(transport, surface, payload).map(T::into_resource)
    }

    match kind {
        ResourceKind::Server => build::<Server>(transport, surface, payload),
        ResourceKind::Allocation => build::<Allocation>(transport, surface, payload),
        ResourceKind::User => build::<User>(transport, surface, payload),
        ResourceKind::Subuser => build::<Subuser>(transport, surface, payload),
        ResourceKind::Nest => build::<Nest>(transport, surface, payload),
        ResourceKind::Egg => build::<Egg>(transport, surface, payload),
        ResourceKind::ServerVariable => build::<ServerVariable>(transport, surface, payload),
        ResourceKind::Location => build::<Location>(transport, surface, payload),
        ResourceKind::Node => build::<Node>(transport, surface, payload),
        ResourceKind::Database => build::<Database>(transport, surface, payload),
        ResourceKind::EggVariable => build::<EggVariable>(transport, surface, payload),
        ResourceKind::Stats => build::<Stats>(transport, surface, payload),
    }
}
