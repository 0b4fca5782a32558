//! Server resource.
//!
//! A [`Server`] can be acted on through whichever API surface it was fetched
//! from:
//!
//! - application: [`Server::details`], [`Server::build`], [`Server::startup`],
//!   [`Server::suspend`], [`Server::unsuspend`], [`Server::reinstall`],
//!   [`Server::delete`]
//! - client: [`Server::power`], [`Server::command`], [`Server::websocket`],
//!   [`Server::resources`]
//!
//! Every action checks the surface first and performs no I/O on mismatch.
//! `details`, `build` and `startup` validate their input before sending and
//! re-hydrate the server from the panel's answer.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut server = application.server(5, &[]).await?;
//! server
//!     .details(json!({"name": "Lobby", "user": 1}))
//!     .await?;
//! assert_eq!(server.name.as_deref(), Some("Lobby"));
//!
//! let server = client.server("1a7ce997", &[]).await?;
//! server.power("restart").await?;
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpRequest};
use crate::config::ApiSurface;
use crate::rest::resource::panel_resource;
use crate::rest::resources::Stats;
use crate::rest::validation::{FieldRules, Rule};
use crate::rest::{request_resource, Fields, PanelResource, ParsedValue, ResourceError};

panel_resource! {
    /// A game server.
    ///
    /// The application and client APIs describe servers with overlapping but
    /// different attribute sets; every attribute of either is typed here.
    Server => ServerAttributes {
        /// Server ID (application API).
        id: u64,
        /// Identifier in an external system.
        external_id: String,
        /// Server UUID.
        uuid: String,
        /// Short identifier used in client API paths.
        identifier: String,
        /// Server ID (client API).
        internal_id: u64,
        /// Display name.
        name: String,
        /// Description.
        description: String,
        /// Lifecycle status such as `installing` or `suspended`.
        status: String,
        /// Whether the server is suspended (application API).
        suspended: bool,
        /// Whether the server is suspended (client API).
        is_suspended: bool,
        /// Whether the server is installing.
        is_installing: bool,
        /// Whether the server is being transferred.
        is_transferring: bool,
        /// Whether the API key's user owns the server.
        server_owner: bool,
        /// Memory, swap, disk, io, cpu and threads limits.
        limits: Fields,
        /// Database, allocation and backup limits.
        feature_limits: Fields,
        /// Owning user ID.
        user: u64,
        /// Node ID (application API) or node name (client API).
        node: ParsedValue,
        /// Primary allocation ID.
        allocation: u64,
        /// Nest ID.
        nest: u64,
        /// Egg ID.
        egg: u64,
        /// Container settings: startup command, image, environment.
        container: Fields,
        /// SFTP connection details.
        sftp_details: Fields,
        /// Rendered startup command.
        invocation: String,
        /// Docker image.
        docker_image: String,
        /// Features enabled by the egg.
        egg_features: Vec<String>,
        /// Last update time.
        updated_at: DateTime<Utc>,
        /// Creation time.
        created_at: DateTime<Utc>,
        /// Included relations.
        relationships: Fields,
    }
}

/// A power action for a server process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerSignal {
    /// Start the process.
    Start,
    /// Stop the process gracefully.
    Stop,
    /// Stop then start the process.
    Restart,
    /// Terminate the process immediately.
    Kill,
}

impl PowerSignal {
    /// Returns the wire name of this signal.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Kill => "kill",
        }
    }
}

impl fmt::Display for PowerSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerSignal {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            "kill" => Ok(Self::Kill),
            other => Err(ResourceError::InvalidPowerSignal {
                signal: other.to_string(),
            }),
        }
    }
}

/// Credentials for the server console websocket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebsocketCredentials {
    /// JWT to send in the websocket `auth` event.
    pub token: String,
    /// Websocket URL.
    pub socket: String,
}

fn details_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("name", [Rule::Required, Rule::String]),
        FieldRules::new("user", [Rule::Required, Rule::Number]),
        FieldRules::new("external_id", [Rule::String]),
        FieldRules::new("description", [Rule::String]),
    ]
}

const BUILD_LIMITS: [&str; 5] = ["memory", "swap", "io", "cpu", "disk"];

fn build_rules() -> Vec<FieldRules> {
    let mut rules = vec![
        FieldRules::new("allocation", [Rule::Required, Rule::Number]),
        FieldRules::new("limits", [Rule::Object]),
    ];
    for limit in BUILD_LIMITS {
        rules.push(FieldRules::new(
            format!("limits.{limit}"),
            [Rule::RequiredWithout(limit.to_string()), Rule::Number],
        ));
    }
    for limit in BUILD_LIMITS {
        rules.push(FieldRules::new(
            limit,
            [Rule::RequiredWithout(format!("limits.{limit}")), Rule::Number],
        ));
    }
    rules.extend([
        FieldRules::new("threads", [Rule::NumberOrString]),
        FieldRules::new("feature_limits", [Rule::Required, Rule::Object]),
        FieldRules::new("feature_limits.databases", [Rule::Present, Rule::Number]),
        FieldRules::new("feature_limits.backups", [Rule::Present, Rule::Number]),
        FieldRules::new("feature_limits.allocations", [Rule::Number]),
    ]);
    rules
}

fn startup_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("startup", [Rule::Required, Rule::String]),
        FieldRules::new("environment", [Rule::Present, Rule::Object]),
        FieldRules::new("egg", [Rule::Required, Rule::Number]),
        FieldRules::new("image", [Rule::Required, Rule::String]),
        FieldRules::new("skip_scripts", [Rule::Present, Rule::Boolean]),
    ]
}

impl Server {
    fn require_id(&self) -> Result<u64, ResourceError> {
        self.attributes
            .id
            .ok_or_else(|| ResourceError::invalid_payload("server has no 'id' attribute"))
    }

    fn require_identifier(&self) -> Result<String, ResourceError> {
        self.attributes
            .identifier
            .as_deref()
            .map(|identifier| urlencoding::encode(identifier).into_owned())
            .ok_or_else(|| ResourceError::invalid_payload("server has no 'identifier' attribute"))
    }

    /// Validates `fields`, PATCHes them and re-hydrates from the answer.
    async fn update(
        &mut self,
        action: &str,
        fields: Value,
        rules: &[FieldRules],
    ) -> Result<(), ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        self.core.validate_fields(&fields, rules)?;
        let id = self.require_id()?;

        let request = HttpRequest::builder(HttpMethod::Patch, format!("/servers/{id}/{action}"))
            .body(fields)
            .build();
        let body = self.core.send(request).await?;
        self.rehydrate(&body)?;
        Ok(())
    }

    async fn application_action(&self, method: HttpMethod, path: String) -> Result<(), ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        self.core
            .send(HttpRequest::builder(method, path).build())
            .await?;
        Ok(())
    }

    /// Updates name, owner, external ID and description.
    ///
    /// | Field         | Rules              |
    /// |---------------|--------------------|
    /// | `name`        | required, string   |
    /// | `user`        | required, number   |
    /// | `external_id` | string             |
    /// | `description` | string             |
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, a field error if validation fails, or any transport error.
    pub async fn details(&mut self, fields: Value) -> Result<(), ResourceError> {
        self.update("details", fields, &details_rules()).await
    }

    /// Updates the build configuration.
    ///
    /// Each of `memory`, `swap`, `io`, `cpu` and `disk` may be given at the
    /// top level or under `limits`; one of the two is required. `allocation`
    /// and `feature_limits` (with `databases` and `backups` present) are
    /// required; `threads` may be a number or a CPU-set string.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, a field error if validation fails, or any transport error.
    pub async fn build(&mut self, fields: Value) -> Result<(), ResourceError> {
        self.update("build", fields, &build_rules()).await
    }

    /// Updates the startup command, environment, egg and image.
    ///
    /// `startup`, `egg` and `image` are required; `environment` and
    /// `skip_scripts` must be present but may be `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, a field error if validation fails, or any transport error.
    pub async fn startup(&mut self, fields: Value) -> Result<(), ResourceError> {
        self.update("startup", fields, &startup_rules()).await
    }

    /// Suspends the server.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport error.
    pub async fn suspend(&self) -> Result<(), ResourceError> {
        let id = self.require_id_for_application()?;
        self.application_action(HttpMethod::Post, format!("/servers/{id}/suspend"))
            .await
    }

    /// Lifts a suspension.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport error.
    pub async fn unsuspend(&self) -> Result<(), ResourceError> {
        let id = self.require_id_for_application()?;
        self.application_action(HttpMethod::Post, format!("/servers/{id}/unsuspend"))
            .await
    }

    /// Reruns the egg's install script.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport error.
    pub async fn reinstall(&self) -> Result<(), ResourceError> {
        let id = self.require_id_for_application()?;
        self.application_action(HttpMethod::Post, format!("/servers/{id}/reinstall"))
            .await
    }

    /// Deletes the server; `force` skips the daemon-side cleanup.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the application
    /// API, or any transport error.
    pub async fn delete(&self, force: bool) -> Result<(), ResourceError> {
        let id = self.require_id_for_application()?;
        let path = if force {
            format!("/servers/{id}/force")
        } else {
            format!("/servers/{id}")
        };
        self.application_action(HttpMethod::Delete, path).await
    }

    fn require_id_for_application(&self) -> Result<u64, ResourceError> {
        self.core.require_surface(ApiSurface::Application)?;
        self.require_id()
    }

    fn require_identifier_for_client(&self) -> Result<String, ResourceError> {
        self.core.require_surface(ApiSurface::Client)?;
        self.require_identifier()
    }

    /// Sends a power signal: `start`, `stop`, `restart` or `kill`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the client API,
    /// [`ResourceError::InvalidPowerSignal`] for any other signal, or any
    /// transport error.
    pub async fn power(&self, signal: &str) -> Result<(), ResourceError> {
        self.core.require_surface(ApiSurface::Client)?;
        let signal: PowerSignal = signal.parse()?;
        let identifier = self.require_identifier()?;

        let request = HttpRequest::builder(HttpMethod::Post, format!("/servers/{identifier}/power"))
            .body(json!({"signal": signal.as_str()}))
            .build();
        self.core.send(request).await?;
        Ok(())
    }

    /// Sends a console command.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the client API,
    /// or any transport error.
    pub async fn command(&self, command: &str) -> Result<(), ResourceError> {
        let identifier = self.require_identifier_for_client()?;

        let request =
            HttpRequest::builder(HttpMethod::Post, format!("/servers/{identifier}/command"))
                .body(json!({"command": command}))
                .build();
        self.core.send(request).await?;
        Ok(())
    }

    /// Requests console websocket credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the client API,
    /// [`ResourceError::InvalidPayload`] if the answer lacks `data.token` or
    /// `data.socket`, or any transport error.
    pub async fn websocket(&self) -> Result<WebsocketCredentials, ResourceError> {
        let identifier = self.require_identifier_for_client()?;

        let body = self
            .core
            .send(HttpRequest::get(format!("/servers/{identifier}/websocket")))
            .await?;

        let data = body.get("data");
        let read = |key: &str| {
            data.and_then(|d| d.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    ResourceError::invalid_payload(format!("websocket answer has no 'data.{key}'"))
                })
        };

        Ok(WebsocketCredentials {
            token: read("token")?,
            socket: read("socket")?,
        })
    }

    /// Fetches live resource usage.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IncorrectSurface`] outside the client API,
    /// or any transport or parse error.
    pub async fn resources(&self) -> Result<Stats, ResourceError> {
        let identifier = self.require_identifier_for_client()?;

        request_resource(
            self.core.transport(),
            self.core.surface(),
            HttpRequest::get(format!("/servers/{identifier}/resources")),
        )
        .await
    }

    /// Returns the included `allocations` relation.
    #[must_use]
    pub fn allocations(&self) -> Option<&crate::rest::ResourceList> {
        self.core
            .relationship("allocations")
            .and_then(ParsedValue::as_list)
    }
}
