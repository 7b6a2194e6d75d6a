//! Card search API client
//!
//! Two read-only endpoints:
//! - `GET /samples` returns the sample query catalog
//! - `GET /search?prompt=..&page=..&per_page=..` runs a natural-language search

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use cardsearch_core::config::join_url;
use cardsearch_core::{CatalogSource, Result, SampleCatalog, UiError};

/// Environment variable holding the API base URL
pub const API_URL_ENV: &str = "CARDSEARCH_API_URL";

/// Search request parameters
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Natural-language query
    pub prompt: String,
    pub page: u32,
    pub per_page: u32,
}

impl SearchParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            page: 1,
            per_page: 20,
        }
    }
}

/// One card in a search response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardResult {
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub oracle_text: Option<String>,
    pub colors: Vec<String>,
    pub color_identity: Vec<String>,
    pub scryfall_uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_cards: u64,
}

/// Body of a `/search` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Filters the server extracted from the prompt, passed through as-is
    pub filters: serde_json::Value,
    pub scryfall_query: Option<String>,
    pub results: Vec<CardResult>,
    pub pagination: Option<Pagination>,
}

/// Client for the card search API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    samples_path: String,
}

impl ApiClient {
    /// Create a client for an absolute base URL such as `https://cards.example.com`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| UiError::config(format!("invalid API URL '{}': {}", base_url, e)))?;
        Ok(Self {
            client: Client::new(),
            base_url,
            samples_path: "/samples".to_string(),
        })
    }

    /// Create client from the CARDSEARCH_API_URL environment variable
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV)
            .map_err(|_| UiError::config(format!("{} not set", API_URL_ENV)))?;
        Self::new(&base_url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Absolute URL of an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        join_url(self.base_url.as_str(), path)
    }

    /// Builder: serve the catalog from another path (default `/samples`)
    pub fn with_samples_path(mut self, path: impl Into<String>) -> Self {
        self.samples_path = path.into();
        self
    }

    pub fn samples_url(&self) -> String {
        self.endpoint(&self.samples_path)
    }

    /// Fetch and validate the sample catalog
    pub async fn fetch_samples(&self) -> Result<SampleCatalog> {
        let url = self.samples_url();
        debug!(url = %url, "fetching sample catalog");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UiError::transport(&url, e))?;
        let body = success_body(&url, response).await?;

        SampleCatalog::from_json(&body)
    }

    /// Run a search
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        let url = self.endpoint("/search");
        debug!(url = %url, prompt = %params.prompt, page = params.page, "searching");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("prompt", params.prompt.clone()),
                ("page", params.page.to_string()),
                ("per_page", params.per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| UiError::transport(&url, e))?;
        let body = success_body(&url, response).await?;

        serde_json::from_str(&body).map_err(|e| UiError::json("search response", e))
    }

    /// Format results as markdown for display
    pub fn format_results(prompt: &str, response: &SearchResponse) -> String {
        let mut output = format!("## Results for \"{}\"\n\n", prompt);

        if let Some(query) = &response.scryfall_query {
            output.push_str(&format!("Scryfall query: `{}`\n\n", query));
        }

        if response.results.is_empty() {
            output.push_str("No cards found.\n");
            return output;
        }

        for (i, card) in response.results.iter().enumerate() {
            match &card.mana_cost {
                Some(cost) if !cost.is_empty() => {
                    output.push_str(&format!("{}. **{}** {}\n", i + 1, card.name, cost))
                }
                _ => output.push_str(&format!("{}. **{}**\n", i + 1, card.name)),
            }
            if let Some(type_line) = &card.type_line {
                output.push_str(&format!("   {}\n", type_line));
            }
            if let Some(text) = &card.oracle_text {
                let preview: String = text.chars().take(200).collect();
                output.push_str(&format!("   {}\n", preview.replace('\n', " / ")));
            }
            output.push('\n');
        }

        if let Some(pagination) = &response.pagination {
            output.push_str(&format!(
                "Page {}/{} ({} cards)\n",
                pagination.page, pagination.total_pages, pagination.total_cards
            ));
        }

        output
    }

    /// Format results as JSON for machine consumption
    pub fn format_json(response: &SearchResponse) -> Result<String> {
        serde_json::to_string_pretty(response).map_err(|e| UiError::json("search output", e))
    }
}

/// Body of a 2xx response; anything else is a status error
async fn success_body(url: &str, response: Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(UiError::status(url, status.as_u16()));
    }
    response.text().await.map_err(|e| UiError::transport(url, e))
}

#[async_trait(?Send)]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(&self) -> Result<SampleCatalog> {
        self.fetch_samples().await
    }

    fn describe(&self) -> String {
        self.samples_url()
    }
}
