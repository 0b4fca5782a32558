//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated panel API key.
///
/// The key is sent as a bearer token on every request. Its `Debug` output is
/// masked so the key never ends up in logs.
///
/// # Example
///
/// ```rust
/// use pterodactyl_api::ApiKey;
///
/// let key = ApiKey::new("ptla_abc123").unwrap();
/// assert_eq!(key.as_ref(), "ptla_abc123");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated panel base URL.
///
/// The URL must carry an `http` or `https` scheme and a host. Trailing
/// slashes are removed so API paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use pterodactyl_api::PanelUrl;
///
/// let url = PanelUrl::new("https://panel.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://panel.example.com");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "panel.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelUrl {
    url: String,
    scheme_end: usize,
}

impl PanelUrl {
    /// Creates a new validated panel URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPanelUrl`] if the URL has no
    /// `http`/`https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let url = raw.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidPanelUrl { url: raw.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::InvalidPanelUrl { url: raw });
        }

        let rest = &url[scheme_end + 3..];
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidPanelUrl { url: raw });
        }

        Ok(Self { url, scheme_end })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host portion of the URL, including any port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        let rest = &self.url[self.scheme_end + 3..];
        rest.split(['/', '?', '#']).next().unwrap_or(rest)
    }
}

impl AsRef<str> for PanelUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for PanelUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty() {
        assert_eq!(ApiKey::new(""), Err(ConfigError::EmptyApiKey));
        assert_eq!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey));
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_panel_url_strips_trailing_slashes() {
        let url = PanelUrl::new("https://panel.example.com///").unwrap();
        assert_eq!(url.as_ref(), "https://panel.example.com");
    }

    #[test]
    fn test_panel_url_keeps_port_and_path() {
        let url = PanelUrl::new("http://127.0.0.1:8080/panel").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "127.0.0.1:8080");
        assert_eq!(url.to_string(), "http://127.0.0.1:8080/panel");
    }

    #[test]
    fn test_panel_url_requires_scheme() {
        assert!(matches!(
            PanelUrl::new("panel.example.com"),
            Err(ConfigError::InvalidPanelUrl { .. })
        ));
        assert!(matches!(
            PanelUrl::new("ftp://panel.example.com"),
            Err(ConfigError::InvalidPanelUrl { .. })
        ));
    }

    #[test]
    fn test_panel_url_requires_host() {
        assert!(matches!(
            PanelUrl::new("https://"),
            Err(ConfigError::InvalidPanelUrl { .. })
        ));
    }
}
