//! Host page collaborators
//!
//! Components never reach for ambient globals. The host hands them these
//! seams at construction: a document to mount views into, a navigator for
//! the address bar, a scheduler for delayed callbacks and a catalog source.
//! All methods take `&self`; implementations use interior mutability the way
//! browser handles do.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::SampleCatalog;
use crate::error::Result;
use crate::view::Node;

/// The parts of the page DOM the components touch
pub trait Document {
    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;

    /// Remove every child of element `id`, then append `nodes`.
    /// Returns false (and changes nothing) when the element does not exist.
    fn replace_children(&self, id: &str, nodes: Vec<Node>) -> bool;

    /// Whether a style block with this id is already installed
    fn has_style(&self, style_id: &str) -> bool;

    /// Append a style block to the document head
    fn append_style(&self, style_id: &str, css: &str);
}

/// State object pushed with each history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
    pub query: String,
}

/// Address bar and history of the hosting page
pub trait Navigator {
    /// e.g. `https://cards.example.com`
    fn origin(&self) -> String;

    /// e.g. `/` or `/search`
    fn pathname(&self) -> String;

    /// Add a history entry without reloading
    fn push_state(&self, state: &HistoryState, url: &str);

    /// Full navigation (page load) to `url`
    fn assign(&self, url: &str);
}

/// Identifies one scheduled callback within its scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Single-shot delayed callbacks on the host's event loop
pub trait Scheduler {
    /// Run `task` once after `delay`, on a later turn of the event loop
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a pending callback. Unknown or already fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

/// Where the sample catalog comes from
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch and parse the catalog. Non-success statuses are errors.
    async fn fetch_catalog(&self) -> Result<SampleCatalog>;

    /// Endpoint description for log lines
    fn describe(&self) -> String;
}

/// Client-side search entry point registered by the host page
pub type SearchTrigger = Rc<dyn Fn(&str)>;
