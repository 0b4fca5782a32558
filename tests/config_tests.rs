//! Integration tests for configuration loading.
//!
//! Environment handling lives in a single test so the process environment
//! is never touched concurrently.

use pterodactyl_api::config::{ENV_PANEL_API_KEY, ENV_PANEL_URL};
use pterodactyl_api::{ApiKey, ConfigError, PanelConfig, PanelUrl};

#[test]
fn test_from_env_reads_url_and_key() {
    std::env::remove_var(ENV_PANEL_URL);
    std::env::remove_var(ENV_PANEL_API_KEY);

    assert!(matches!(
        PanelConfig::from_env(),
        Err(ConfigError::MissingEnvVar { name: "PANEL_URL" })
    ));

    std::env::set_var(ENV_PANEL_URL, "https://panel.example.com/");
    assert!(matches!(
        PanelConfig::from_env(),
        Err(ConfigError::MissingEnvVar {
            name: "PANEL_API_KEY"
        })
    ));

    std::env::set_var(ENV_PANEL_API_KEY, "");
    assert!(matches!(
        PanelConfig::from_env(),
        Err(ConfigError::EmptyApiKey)
    ));

    std::env::set_var(ENV_PANEL_API_KEY, "ptla_from_env");
    let config = PanelConfig::from_env().unwrap();
    assert_eq!(config.base_url().as_ref(), "https://panel.example.com");
    assert_eq!(config.api_key().as_ref(), "ptla_from_env");

    std::env::remove_var(ENV_PANEL_URL);
    std::env::remove_var(ENV_PANEL_API_KEY);
}

#[test]
fn test_invalid_url_is_rejected() {
    assert!(matches!(
        PanelUrl::new("panel.example.com"),
        Err(ConfigError::InvalidPanelUrl { .. })
    ));
}

#[test]
fn test_config_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PanelConfig>();
    assert_send_sync::<ApiKey>();
}
