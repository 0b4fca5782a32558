//! Response parsing and the typed resource model.
//!
//! - **[`parse`]**: turns a decoded panel payload into a [`ParsedValue`] tree
//! - **[`ResourceList`]**: a `list` envelope, dereferencing to its items
//! - **[`PanelResource`]**: behaviour shared by every typed resource
//! - **[`ResourceCore`]**: transport, surface, hydrated fields and `meta`
//! - **[`validation`]**: rule tables checked before mutating calls
//! - **[`ResourceError`]**: errors raised while parsing or acting on resources
//!
//! # Example
//!
//! ```rust,ignore
//! use pterodactyl_api::rest::{parse, PanelResource, ParsedValue};
//! use pterodactyl_api::rest::resources::Server;
//!
//! let parsed = parse(&transport, ApiSurface::Application, &body)?;
//! if let Some(server) = parsed.downcast_ref::<Server>() {
//!     println!("{:?}", server.name);
//! }
//! ```

mod errors;
pub mod resource;
pub mod resources;
mod response;
pub mod validation;

pub use errors::ResourceError;
pub use resource::{FieldValue, PanelResource, ResourceCore};
pub use response::{parse, Fields, Pagination, ParsedValue, ResourceList, LIST_OBJECT};

pub(crate) use response::{request_list, request_resource};
