//! HTTP client for panel API communication.
//!
//! This module provides the [`HttpClient`] type, the reqwest-backed
//! [`Transport`] used by the facades.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::transport::Transport;
use crate::config::{ApiSurface, PanelConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one panel and one API surface.
///
/// The client handles:
/// - Base URI construction (`<panel>/api/<surface>`)
/// - Default headers including User-Agent and the bearer token
/// - JSON encoding of request bodies and decoding of response bodies
/// - Mapping non-2xx statuses to [`HttpResponseError`]
///
/// Requests are attempted exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use pterodactyl_api::{ApiSurface, PanelConfig};
/// use pterodactyl_api::clients::{HttpClient, HttpRequest, Transport};
///
/// let client = HttpClient::new(&config, ApiSurface::Application)?;
/// let body = client.request(HttpRequest::get("/servers")).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Base URI (e.g., `https://panel.example.com`).
    base_uri: String,
    /// Base path (e.g., `/api/application`).
    base_path: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the given configuration and surface.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: &PanelConfig, surface: ApiSurface) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Panel API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", config.api_key().as_ref()),
        );

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_uri: config.base_url().as_ref().to_string(),
            base_path: surface.base_path().to_string(),
            default_headers,
        })
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Decodes a response body; an empty body is `null`.
    fn decode_body(body_text: &str) -> Result<serde_json::Value, serde_json::Error> {
        if body_text.trim().is_empty() {
            Ok(serde_json::Value::Null)
        } else {
            serde_json::from_str(body_text)
        }
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, request: HttpRequest) -> Result<serde_json::Value, HttpError> {
        let url = format!("{}{}{}", self.base_uri, self.base_path, request.path);

        tracing::debug!(method = %request.http_method, path = %request.path, "Sending panel request");

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let res = req_builder.send().await?;
        let code = res.status().as_u16();
        let body_text = res.text().await?;

        if !(200..=299).contains(&code) {
            tracing::warn!(
                method = %request.http_method,
                path = %request.path,
                code,
                "Panel returned an error status"
            );
            // Error bodies are not always JSON (e.g. gateway pages).
            let body = Self::decode_body(&body_text)
                .unwrap_or_else(|_| serde_json::Value::String(body_text));
            return Err(HttpError::Response(HttpResponseError { code, body }));
        }

        Ok(Self::decode_body(&body_text)?)
    }
}
