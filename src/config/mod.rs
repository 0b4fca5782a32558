//! Configuration types for the panel SDK.
//!
//! # Overview
//!
//! - [`PanelConfig`]: The configuration struct holding all SDK settings
//! - [`PanelConfigBuilder`]: A builder for constructing [`PanelConfig`] instances
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`PanelUrl`]: A validated panel base URL
//! - [`ApiSurface`]: The API personality (application or client)
//!
//! # Example
//!
//! ```rust
//! use pterodactyl_api::{PanelConfig, ApiKey, PanelUrl};
//!
//! let config = PanelConfig::builder()
//!     .base_url(PanelUrl::new("https://panel.example.com").unwrap())
//!     .api_key(ApiKey::new("ptla_abc123").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod surface;

pub use newtypes::{ApiKey, PanelUrl};
pub use surface::ApiSurface;

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable read by [`PanelConfig::from_env`] for the panel URL.
pub const ENV_PANEL_URL: &str = "PANEL_URL";

/// Environment variable read by [`PanelConfig::from_env`] for the API key.
pub const ENV_PANEL_API_KEY: &str = "PANEL_API_KEY";

/// Configuration for the panel SDK.
///
/// One configuration holds one (base URL, API key) pair. Application keys
/// and client keys are different credentials, so an application facade and
/// a client facade are normally built from two configurations.
///
/// # Thread Safety
///
/// `PanelConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct PanelConfig {
    base_url: PanelUrl,
    api_key: ApiKey,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl PanelConfig {
    /// Creates a new builder for constructing a `PanelConfig`.
    #[must_use]
    pub fn builder() -> PanelConfigBuilder {
        PanelConfigBuilder::new()
    }

    /// Builds a configuration from the `PANEL_URL` and `PANEL_API_KEY`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a variable is unset, or the
    /// validation error of the corresponding newtype.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(ENV_PANEL_URL).map_err(|_| ConfigError::MissingEnvVar {
            name: ENV_PANEL_URL,
        })?;
        let key = std::env::var(ENV_PANEL_API_KEY).map_err(|_| ConfigError::MissingEnvVar {
            name: ENV_PANEL_API_KEY,
        })?;

        Self::builder()
            .base_url(PanelUrl::new(url)?)
            .api_key(ApiKey::new(key)?)
            .build()
    }

    /// Returns the panel base URL.
    #[must_use]
    pub const fn base_url(&self) -> &PanelUrl {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify PanelConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PanelConfig>();
};

/// Builder for constructing [`PanelConfig`] instances.
///
/// `base_url` and `api_key` are required; everything else is optional.
#[derive(Debug, Default)]
pub struct PanelConfigBuilder {
    base_url: Option<PanelUrl>,
    api_key: Option<ApiKey>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl PanelConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the panel base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: PanelUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`PanelConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` or
    /// `api_key` are not set.
    pub fn build(self) -> Result<PanelConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(PanelConfig {
            base_url,
            api_key,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
