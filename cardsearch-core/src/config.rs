use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, UiError};

/// Settings shared by the warm-up indicator and the sample browser.
///
/// Every field has a default, so an empty TOML document is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Base URL of the search API. Empty means "same origin as the page".
    pub api_base_url: String,
    pub warmup: WarmupConfig,
    pub samples: SamplesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarmupConfig {
    /// How long a request may run before the warm-up message replaces the indicator
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    /// Path of the catalog endpoint, relative to `api_base_url`
    pub endpoint: String,
    /// Container that receives the full card view on mount
    pub container_id: String,
    /// Container that receives the compact button row on mount
    pub compact_container_id: String,
    /// Number of buttons in the compact row
    pub compact_limit: usize,
}

impl Default for WarmupConfig {
    fn default() -> Self {
        Self { delay_ms: 5000 }
    }
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            endpoint: "/samples".to_string(),
            container_id: "samples-container".to_string(),
            compact_container_id: "compact-samples".to_string(),
            compact_limit: 6,
        }
    }
}

impl WarmupConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl UiConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| UiError::config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML (used by `config init`)
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| UiError::config(format!("failed to serialize config: {}", e)))
    }

    /// Absolute or origin-relative URL of the catalog endpoint
    pub fn samples_url(&self) -> String {
        join_url(&self.api_base_url, &self.samples.endpoint)
    }

    /// Reject values the components cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.samples.endpoint.trim().is_empty() {
            return Err(UiError::config("samples.endpoint must not be empty"));
        }
        if self.samples.container_id.trim().is_empty()
            || self.samples.compact_container_id.trim().is_empty()
        {
            return Err(UiError::config("samples container ids must not be empty"));
        }
        Ok(())
    }
}

/// Join a base URL and a path without doubling or dropping the slash
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = UiConfig::from_toml_str("").unwrap();
        assert_eq!(config, UiConfig::default());
        assert_eq!(config.warmup.delay(), Duration::from_millis(5000));
        assert_eq!(config.samples.compact_limit, 6);
        assert_eq!(config.samples_url(), "/samples");
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = UiConfig::from_toml_str(
            r#"
            api_base_url = "https://cards.example.com/"

            [warmup]
            delay_ms = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.warmup.delay_ms, 1500);
        assert_eq!(config.samples.container_id, "samples-container");
        assert_eq!(config.samples_url(), "https://cards.example.com/samples");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = UiConfig::from_toml_str("[samples]\nendpoint = \"  \"").unwrap_err();
        assert!(matches!(err, UiError::Config { .. }));

        let err = UiConfig::from_toml_str("warmup = 3").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn toml_round_trip_keeps_values() {
        let mut config = UiConfig::default();
        config.samples.compact_limit = 3;
        let text = config.to_toml_string().unwrap();
        assert_eq!(UiConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("", "/samples"), "/samples");
        assert_eq!(join_url("http://a", "samples"), "http://a/samples");
        assert_eq!(join_url("http://a/", "/samples"), "http://a/samples");
    }
}
