//! Samples command - preview the sample query catalog
//!
//! Loads the catalog the same way the web page does and renders it through
//! the same components into an in-memory document, so the printed HTML is
//! exactly what the page would mount.

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use cardsearch_client::ApiClient;
use cardsearch_core::memory::{MemoryDocument, MemoryNavigator};
use cardsearch_core::{CatalogSource, SampleBrowser, SampleCatalog, UiConfig, UiError};
use clap::{Parser, ValueEnum};
use tracing::{info, instrument};

use crate::ui;

#[derive(Parser, Debug)]
pub struct SamplesArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: SamplesFormat,

    /// Number of buttons in the compact view (default: samples.compact_limit)
    #[arg(long)]
    pub max: Option<usize>,

    /// Prepend the style sheet to HTML output
    #[arg(long)]
    pub with_styles: bool,

    /// Read the catalog from a local JSON file instead of the API
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum SamplesFormat {
    /// Card grid as HTML
    Full,
    /// Compact button row as HTML
    Compact,
    /// Catalog JSON as loaded
    Json,
    /// Plain listing
    #[default]
    Text,
}

/// Catalog source reading a JSON file from disk
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait(?Send)]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> cardsearch_core::Result<SampleCatalog> {
        let body = std::fs::read_to_string(&self.path).map_err(UiError::from)?;
        SampleCatalog::from_json(&body)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

#[instrument(skip_all, fields(format = ?args.format))]
pub async fn run_samples(args: SamplesArgs, config: &UiConfig) -> Result<()> {
    let source: Box<dyn CatalogSource> = match &args.file {
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => Box::new(super::api_client(config)?),
    };
    let endpoint = source.describe();

    let origin = if config.api_base_url.is_empty() {
        "http://localhost".to_string()
    } else {
        config.api_base_url.trim_end_matches('/').to_string()
    };
    let samples = &config.samples;
    let document = Rc::new(MemoryDocument::with_elements([
        samples.container_id.as_str(),
        samples.compact_container_id.as_str(),
    ]));
    let navigator = Rc::new(MemoryNavigator::new(origin, "/"));
    let browser = SampleBrowser::new(source, document.clone(), navigator, None);

    let pb = ui::spinner("Loading sample queries...");
    let Some(catalog) = browser.load_catalog().await else {
        ui::finish_error(pb, "Failed to load sample queries");
        bail!("Failed to load sample queries from {}", endpoint);
    };
    ui::finish_success(
        pb,
        format!(
            "Loaded {} queries in {} categories",
            catalog.query_count(),
            catalog.samples.len()
        ),
    );
    info!(endpoint = %endpoint, queries = catalog.query_count(), "catalog ready");

    match args.format {
        SamplesFormat::Json => {
            let json = serde_json::to_string_pretty(catalog.as_ref())
                .context("Failed to serialize catalog")?;
            println!("{}", json);
        }
        SamplesFormat::Text => print!("{}", format_text(&catalog)),
        SamplesFormat::Full | SamplesFormat::Compact => {
            let container = if args.format == SamplesFormat::Full {
                browser.render(&samples.container_id);
                samples.container_id.as_str()
            } else {
                let max = args.max.unwrap_or(samples.compact_limit);
                browser.render_compact(&samples.compact_container_id, Some(max));
                samples.compact_container_id.as_str()
            };

            if args.with_styles {
                browser.inject_styles();
                println!("{}", document.styles_html());
            }
            let html = document
                .html(container)
                .ok_or_else(|| anyhow!("container '{}' missing", container))?;
            println!("<div id=\"{}\">{}</div>", container, html);
        }
    }

    Ok(())
}

fn format_text(catalog: &SampleCatalog) -> String {
    let mut output = String::new();
    for category in &catalog.samples {
        output.push_str(&format!("## {}\n", category.category));
        if !category.description.is_empty() {
            output.push_str(&format!("{}\n", category.description));
        }
        output.push('\n');
        for query in &category.queries {
            output.push_str(&format!(
                "  \"{}\" ({})",
                query.text,
                query.expected_label()
            ));
            if !query.tags.is_empty() {
                output.push_str(&format!(" [{}]", query.tags.join(", ")));
            }
            output.push('\n');
            if !query.description.is_empty() {
                output.push_str(&format!("      {}\n", query.description));
            }
        }
        output.push('\n');
    }
    output
}
