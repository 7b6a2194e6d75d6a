//! In-memory host implementations
//!
//! Used by the test suites and by the CLI's static preview. `MemoryDocument`
//! keeps mounted view trees per element id, `ManualScheduler` runs a virtual
//! clock that only moves when told to.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::SampleCatalog;
use crate::error::{Result, UiError};
use crate::host::{CatalogSource, Document, HistoryState, Navigator, Scheduler, TimerId};
use crate::view::{self, Element, Node};

// ============================================================================
// Document
// ============================================================================

#[derive(Default)]
pub struct MemoryDocument {
    elements: RefCell<BTreeMap<String, Vec<Node>>>,
    styles: RefCell<Vec<(String, String)>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with empty elements for each id
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let doc = Self::new();
        for id in ids {
            doc.add_element(id);
        }
        doc
    }

    pub fn add_element(&self, id: impl Into<String>) {
        self.elements.borrow_mut().entry(id.into()).or_default();
    }

    pub fn remove_element(&self, id: &str) {
        self.elements.borrow_mut().remove(id);
    }

    /// Replace the element's content with a plain text node
    pub fn set_text(&self, id: &str, text: impl Into<String>) -> bool {
        self.replace_children(id, vec![Node::Text(text.into())])
    }

    /// Snapshot of an element's children. Handlers stay live in the copy.
    pub fn children(&self, id: &str) -> Option<Vec<Node>> {
        self.elements.borrow().get(id).cloned()
    }

    pub fn html(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|nodes| view::to_html(nodes))
    }

    pub fn text(&self, id: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(id)
            .map(|nodes| nodes.iter().map(Node::text_content).collect())
    }

    /// Elements under `id` carrying `class`, in document order
    pub fn by_class(&self, id: &str, class: &str) -> Vec<Element> {
        self.elements
            .borrow()
            .get(id)
            .map(|nodes| {
                nodes
                    .iter()
                    .flat_map(|node| node.by_class(class))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn style_count(&self, style_id: &str) -> usize {
        self.styles
            .borrow()
            .iter()
            .filter(|(id, _)| id == style_id)
            .count()
    }

    /// Installed style ids in insertion order
    pub fn style_ids(&self) -> Vec<String> {
        self.styles.borrow().iter().map(|(id, _)| id.clone()).collect()
    }

    /// Installed style blocks as `<style>` markup
    pub fn styles_html(&self) -> String {
        self.styles
            .borrow()
            .iter()
            .map(|(id, css)| format!("<style id=\"{}\">{}</style>", id, css))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn replace_children(&self, id: &str, nodes: Vec<Node>) -> bool {
        match self.elements.borrow_mut().get_mut(id) {
            Some(children) => {
                *children = nodes;
                true
            }
            None => false,
        }
    }

    fn has_style(&self, style_id: &str) -> bool {
        self.styles.borrow().iter().any(|(id, _)| id == style_id)
    }

    fn append_style(&self, style_id: &str, css: &str) {
        self.styles
            .borrow_mut()
            .push((style_id.to_string(), css.to_string()));
    }
}

// ============================================================================
// Navigator
// ============================================================================

pub struct MemoryNavigator {
    origin: String,
    pathname: String,
    history: RefCell<Vec<(HistoryState, String)>>,
    assigned: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(origin: impl Into<String>, pathname: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            pathname: pathname.into(),
            history: RefCell::new(Vec::new()),
            assigned: RefCell::new(Vec::new()),
        }
    }

    /// Pushed history entries, oldest first
    pub fn history(&self) -> Vec<(HistoryState, String)> {
        self.history.borrow().clone()
    }

    /// URLs passed to full navigations, oldest first
    pub fn assigned(&self) -> Vec<String> {
        self.assigned.borrow().clone()
    }
}

impl Navigator for MemoryNavigator {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn push_state(&self, state: &HistoryState, url: &str) {
        self.history
            .borrow_mut()
            .push((state.clone(), url.to_string()));
    }

    fn assign(&self, url: &str) {
        self.assigned.borrow_mut().push(url.to_string());
    }
}

// ============================================================================
// Scheduler
// ============================================================================

struct PendingTask {
    id: TimerId,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Virtual-clock scheduler. Nothing runs until [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<PendingTask>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.borrow().iter().any(|p| p.id == id)
    }

    /// Move the clock forward, running due tasks in due-time order.
    /// Tasks may schedule or cancel others while running.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        while let Some(task) = self.take_next_due(target) {
            self.now.set(task.due);
            (task.task)();
        }
        self.now.set(target);
    }

    fn take_next_due(&self, target: Duration) -> Option<PendingTask> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.pending.borrow_mut().push(PendingTask {
            id,
            due: self.now.get() + delay,
            task,
        });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|p| p.id != id);
    }
}

// ============================================================================
// Catalog source
// ============================================================================

/// Catalog source answering from a queue of canned responses
#[derive(Default)]
pub struct StaticCatalogSource {
    responses: RefCell<VecDeque<Result<SampleCatalog>>>,
    calls: Cell<usize>,
}

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: queue a response
    pub fn with_response(self, response: Result<SampleCatalog>) -> Self {
        self.push(response);
        self
    }

    pub fn push(&self, response: Result<SampleCatalog>) {
        self.responses.borrow_mut().push_back(response);
    }

    /// Number of fetches issued so far
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> Result<SampleCatalog> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(UiError::transport(self.describe(), "no response queued")))
    }

    fn describe(&self) -> String {
        "memory:/samples".to_string()
    }
}
