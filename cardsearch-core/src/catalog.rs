//! Sample query catalog served by `GET /samples`
//!
//! The catalog is fetched once and then held immutably. A later successful
//! fetch replaces it wholesale; nothing here mutates a loaded catalog.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UiError};

/// The full set of sample categories, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleCatalog {
    pub samples: Vec<Category>,
}

/// A named group of sample queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub queries: Vec<SampleQuery>,
}

/// One example search with the result count it is expected to produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleQuery {
    pub text: String,
    #[serde(default)]
    pub description: String,
    pub expected_min: u32,
    pub expected_max: u32,
    /// Rendered verbatim as badges, so order and duplicates are kept
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A query paired with the name of the category it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatQuery<'a> {
    pub category: &'a str,
    pub query: &'a SampleQuery,
}

impl SampleCatalog {
    /// Parse a `/samples` response body and check its invariants
    pub fn from_json(body: &str) -> Result<Self> {
        let catalog: Self =
            serde_json::from_str(body).map_err(|e| UiError::json("sample catalog", e))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every query must have text and an ordered expected range
    pub fn validate(&self) -> Result<()> {
        for category in &self.samples {
            for (index, query) in category.queries.iter().enumerate() {
                if query.text.is_empty() {
                    return Err(UiError::invalid_catalog(format!(
                        "query {} in '{}' has empty text",
                        index, category.category
                    )));
                }
                if query.expected_min > query.expected_max {
                    return Err(UiError::invalid_catalog(format!(
                        "'{}' expects {}-{} results (min above max)",
                        query.text, query.expected_min, query.expected_max
                    )));
                }
            }
        }
        Ok(())
    }

    /// All queries in category-then-query order
    pub fn flatten(&self) -> impl Iterator<Item = FlatQuery<'_>> + '_ {
        self.samples.iter().flat_map(|category| {
            category.queries.iter().map(move |query| FlatQuery {
                category: &category.category,
                query,
            })
        })
    }

    pub fn query_count(&self) -> usize {
        self.samples.iter().map(|c| c.queries.len()).sum()
    }
}

impl SampleQuery {
    /// Label shown on the card, e.g. `"5-20 results"`
    pub fn expected_label(&self) -> String {
        format!("{}-{} results", self.expected_min, self.expected_max)
    }
}
