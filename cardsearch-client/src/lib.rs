//! cardsearch-client - HTTP access to the card search API
//!
//! This crate provides:
//! - [`ApiClient`], a reqwest client for `GET /samples` and `GET /search`
//! - the [`CatalogSource`](cardsearch_core::CatalogSource) implementation the
//!   sample browser loads its catalog through
//! - markdown and JSON renderings of search results for the CLI
//!
//! ## Architecture
//!
//! ```text
//! SampleBrowser ──CatalogSource──▶ ApiClient ──GET /samples──▶ SampleCatalog
//! cardsearch search ─────────────▶ ApiClient ──GET /search───▶ SearchResponse
//! ```
//!
//! Builds for native targets and for wasm32, where reqwest goes through the
//! browser's `fetch`.

pub mod api;

pub use api::{ApiClient, CardResult, Pagination, SearchParams, SearchResponse, API_URL_ENV};
