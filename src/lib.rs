//! # Pterodactyl API Rust SDK
//!
//! A Rust SDK for the Pterodactyl game panel API, covering both the
//! application (administrative) and the client (end-user) API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`PanelConfig`] and [`PanelConfigBuilder`]
//! - Validated newtypes for the panel URL and API key
//! - An async HTTP transport with bearer authentication
//! - A response parser that turns panel payloads into typed resources
//! - Resource actions (power, console commands, build updates, ...) gated by
//!   API surface and validated before anything is sent
//!
//! ## Quick Start
//!
//! ```rust
//! use pterodactyl_api::{ApiKey, PanelConfig, PanelUrl};
//!
//! let config = PanelConfig::builder()
//!     .base_url(PanelUrl::new("https://panel.example.com").unwrap())
//!     .api_key(ApiKey::new("ptla_abc123").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Application API
//!
//! ```rust,ignore
//! use pterodactyl_api::{ApplicationApi, ListQuery};
//! use pterodactyl_api::rest::resources::Server;
//!
//! let api = ApplicationApi::new(&config)?;
//!
//! let servers = api.servers(&ListQuery::new().page(1).include("allocations")).await?;
//! for server in servers.resources::<Server>() {
//!     println!("{} -> {:?}", server.id.unwrap_or_default(), server.name);
//! }
//! if let Some(pagination) = servers.pagination() {
//!     println!("{} servers in total", pagination.total);
//! }
//!
//! let server = api.server(5, &[]).await?;
//! server.suspend().await?;
//! ```
//!
//! ## Client API
//!
//! ```rust,ignore
//! use pterodactyl_api::ClientApi;
//!
//! let api = ClientApi::new(&client_config)?;
//! let server = api.server("1a7ce997", &[]).await?;
//!
//! server.power("start").await?;
//! let stats = server.resources().await?;
//! println!("{:?} using {} bytes", stats.current_state, stats.usage().memory_bytes);
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events (requests at `debug`, error statuses at
//! `warn`, resource materialization at `trace`) and never installs a
//! subscriber itself.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: newtypes validate on construction; mutators
//!   validate their input before sending
//! - **Thread-safe**: the transport is `Send + Sync` and shared via `Arc`
//! - **Async-first**: every network operation is async on Tokio

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use api::{ApplicationApi, ClientApi, ListQuery};
pub use config::{ApiKey, ApiSurface, PanelConfig, PanelConfigBuilder, PanelUrl};
pub use error::ConfigError;

// Re-export transport types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponseError,
    SharedTransport, StatusKind, Transport,
};

// Re-export parser and resource model types
pub use rest::{
    parse, Pagination, PanelResource, ParsedValue, ResourceCore, ResourceError, ResourceList,
};
