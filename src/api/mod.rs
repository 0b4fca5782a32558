//! Entry points for the two panel API surfaces.
//!
//! - [`ApplicationApi`]: administrative API, bound to
//!   [`ApiSurface::Application`](crate::ApiSurface::Application)
//! - [`ClientApi`]: end-user API, bound to
//!   [`ApiSurface::Client`](crate::ApiSurface::Client)
//! - [`ListQuery`]: page, filters, sort and includes for list calls
//!
//! Each facade owns one transport. Every resource it returns shares that
//! transport and carries the facade's surface, so resource actions need no
//! further setup.

mod application;
mod client;
pub mod query;

pub use application::ApplicationApi;
pub use client::ClientApi;
pub use query::ListQuery;
