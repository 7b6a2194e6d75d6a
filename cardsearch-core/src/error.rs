//! Structured error types for cardsearch-core.
//!
//! Uses `thiserror` so library consumers get composable errors. The
//! components themselves never hand these to the host page: they log and
//! degrade to a no-op. Binary crates wrap them with `anyhow`.

use std::io;
use thiserror::Error;

/// Main error type for cardsearch-core operations
#[derive(Error, Debug)]
pub enum UiError {
    /// The request never produced a response (DNS, connect, body read)
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Catalog parsed but breaks an invariant
    #[error("Invalid sample catalog: {reason}")]
    InvalidCatalog { reason: String },

    /// Host element looked up by id does not exist
    #[error("Element '{id}' not found")]
    MissingTarget { id: String },

    /// Render requested before any catalog was loaded
    #[error("No samples loaded. Load the catalog first")]
    CatalogNotLoaded,

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for cardsearch-core operations
pub type Result<T> = std::result::Result<T, UiError>;

impl UiError {
    /// Create a transport error
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Create a missing target error
    pub fn missing_target(id: impl Into<String>) -> Self {
        Self::MissingTarget { id: id.into() }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// True for failures of the underlying request (transport or status)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}
