//! Command implementations for the cardsearch CLI

pub mod samples;
pub mod search;

use anyhow::{bail, Context, Result};
use cardsearch_client::ApiClient;
use cardsearch_core::UiConfig;

pub use samples::run_samples;
pub use search::run_search;

/// API client for the configured base URL
pub(crate) fn api_client(config: &UiConfig) -> Result<ApiClient> {
    if config.api_base_url.trim().is_empty() {
        bail!(
            "No API URL configured. Pass --api-url, set {} or add api_base_url to {}",
            cardsearch_client::API_URL_ENV,
            crate::config::config_path().display()
        );
    }
    let client = ApiClient::new(&config.api_base_url)
        .with_context(|| format!("Invalid API URL '{}'", config.api_base_url))?;
    Ok(client.with_samples_path(config.samples.endpoint.clone()))
}
