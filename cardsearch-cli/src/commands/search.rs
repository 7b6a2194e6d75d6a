//! Search command - run a card search with the warm-up indicator
//!
//! The spinner plays the part of the page's search indicator: if the API has
//! not answered after the warm-up delay (cold start), its message switches to
//! the warming-up notice. The timer is cancelled whether the request succeeds
//! or fails.

use std::io::{self, BufRead};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use cardsearch_client::{ApiClient, SearchParams};
use cardsearch_core::{TokioScheduler, UiConfig, WarmupIndicator};
use clap::{Parser, ValueEnum};
use tokio::task::LocalSet;
use tracing::instrument;

use crate::ui::{self, SpinnerDocument, SEARCH_INDICATOR_ID};

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Natural-language query (reads from stdin if not provided)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Result page to fetch
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub per_page: u32,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Milliseconds before the warm-up notice appears (default: warmup.delay_ms)
    #[arg(long, value_name = "MS")]
    pub warmup_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable markdown
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

#[instrument(skip_all, fields(page = args.page, per_page = args.per_page))]
pub async fn run_search(args: SearchArgs, config: &UiConfig) -> Result<()> {
    let query = match args.query {
        Some(q) => q,
        None => read_stdin()?,
    };
    if query.trim().is_empty() {
        bail!("No query provided. Pass a query argument or pipe input via stdin.");
    }

    let client = super::api_client(config)?;
    let params = SearchParams {
        prompt: query.trim().to_string(),
        page: args.page,
        per_page: args.per_page,
    };
    let delay = args
        .warmup_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.warmup.delay());

    let document = Rc::new(SpinnerDocument::new(ui::spinner("Searching cards...")));

    // The scheduler spawns local tasks, so the request runs inside a LocalSet
    let result = LocalSet::new()
        .run_until(async {
            let indicator =
                WarmupIndicator::new(Rc::new(TokioScheduler::new()), document.clone())
                    .with_delay(delay);

            indicator.start_timer(SEARCH_INDICATOR_ID);
            let result = client.search(&params).await;
            indicator.cancel_timer();
            result
        })
        .await;

    let pb = document.spinner();
    let response = match result {
        Ok(response) => {
            ui::finish_success(pb, format!("{} cards", response.results.len()));
            response
        }
        Err(e) => {
            ui::finish_error(pb, "Search failed");
            return Err(e).with_context(|| format!("Search for \"{}\" failed", params.prompt));
        }
    };

    match args.format {
        OutputFormat::Json => println!("{}", ApiClient::format_json(&response)?),
        OutputFormat::Text => println!("{}", ApiClient::format_results(&params.prompt, &response)),
    }
    Ok(())
}

fn read_stdin() -> Result<String> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        lines.push(line.context("Failed to read query from stdin")?);
    }
    Ok(lines.join("\n"))
}
