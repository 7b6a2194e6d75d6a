//! Sample query browser
//!
//! Loads the example-search catalog once, renders it into host containers as
//! cards or as a compact button row, and turns a click into a navigation:
//! push a `?q=` history entry, then hand the query to the page's search
//! trigger (or reload the page at that URL when none is registered).
//!
//! Load states:
//!
//! ```text
//! Unloaded ──load──▶ Loading ──ok──▶ Loaded ──load──▶ Loading ──ok──▶ Loaded
//!                       │                                │
//!                       └─err─▶ Unloaded                 └─err─▶ Loaded (previous catalog kept)
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, error, info};

use crate::cards;
use crate::catalog::SampleCatalog;
use crate::config::SamplesConfig;
use crate::error::{Result, UiError};
use crate::host::{CatalogSource, Document, HistoryState, Navigator, SearchTrigger};
use crate::styles::{ensure_styles, SAMPLES_CSS, SAMPLES_STYLE_ID};
use crate::view::Node;

pub const DEFAULT_COMPACT_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

/// What a call to [`SampleNavigation::navigate`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// History entry pushed and the search trigger invoked in place
    Searched { url: String },
    /// History entry pushed, then a full page load of `url`
    Reloaded { url: String },
    /// Empty query, nothing happened
    Ignored,
}

/// Navigation half of the browser, shared with every card callback
pub struct SampleNavigation {
    navigator: Rc<dyn Navigator>,
    trigger: Option<SearchTrigger>,
}

impl SampleNavigation {
    pub fn new(navigator: Rc<dyn Navigator>, trigger: Option<SearchTrigger>) -> Self {
        Self { navigator, trigger }
    }

    /// `<origin><path>?q=<percent-encoded text>`
    pub fn url_for(&self, query_text: &str) -> String {
        format!(
            "{}{}?q={}",
            self.navigator.origin(),
            self.navigator.pathname(),
            urlencoding::encode(query_text)
        )
    }

    pub fn navigate(&self, query_text: &str) -> NavigationOutcome {
        if query_text.is_empty() {
            debug!("ignoring navigation to an empty query");
            return NavigationOutcome::Ignored;
        }

        let url = self.url_for(query_text);
        let state = HistoryState {
            query: query_text.to_string(),
        };
        self.navigator.push_state(&state, &url);

        match &self.trigger {
            Some(trigger) => {
                debug!(url = %url, "running client-side search");
                trigger(query_text);
                NavigationOutcome::Searched { url }
            }
            None => {
                debug!(url = %url, "no search trigger registered, loading page");
                self.navigator.assign(&url);
                NavigationOutcome::Reloaded { url }
            }
        }
    }
}

/// Which containers [`SampleBrowser::mount`] filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MountReport {
    pub loaded: bool,
    pub full: bool,
    pub compact: bool,
}

pub struct SampleBrowser {
    source: Box<dyn CatalogSource>,
    document: Rc<dyn Document>,
    navigation: Rc<SampleNavigation>,
    catalog: RefCell<Option<Rc<SampleCatalog>>>,
    load_state: Cell<LoadState>,
}

impl SampleBrowser {
    pub fn new(
        source: Box<dyn CatalogSource>,
        document: Rc<dyn Document>,
        navigator: Rc<dyn Navigator>,
        trigger: Option<SearchTrigger>,
    ) -> Self {
        Self {
            source,
            document,
            navigation: Rc::new(SampleNavigation::new(navigator, trigger)),
            catalog: RefCell::new(None),
            load_state: Cell::new(LoadState::Unloaded),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }

    /// Currently held catalog, if any load has succeeded
    pub fn catalog(&self) -> Option<Rc<SampleCatalog>> {
        self.catalog.borrow().clone()
    }

    /// Fetch the catalog. On success the stored catalog is replaced as a
    /// whole and returned; on failure the error is logged, whatever was
    /// loaded before stays in place and `None` comes back. No retry.
    pub async fn load_catalog(&self) -> Option<Rc<SampleCatalog>> {
        self.load_state.set(LoadState::Loading);
        let endpoint = self.source.describe();

        let fetched = self
            .source
            .fetch_catalog()
            .await
            .and_then(|catalog| catalog.validate().map(|_| catalog));

        match fetched {
            Ok(catalog) => {
                info!(
                    endpoint = %endpoint,
                    categories = catalog.samples.len(),
                    queries = catalog.query_count(),
                    "sample catalog loaded"
                );
                let catalog = Rc::new(catalog);
                *self.catalog.borrow_mut() = Some(Rc::clone(&catalog));
                self.load_state.set(LoadState::Loaded);
                Some(catalog)
            }
            Err(err) => {
                error!(endpoint = %endpoint, error = %err, "Failed to load sample queries");
                let state = if self.catalog.borrow().is_some() {
                    LoadState::Loaded
                } else {
                    LoadState::Unloaded
                };
                self.load_state.set(state);
                None
            }
        }
    }

    /// Push a `?q=` history entry and run the search for `query_text`
    pub fn navigate(&self, query_text: &str) -> NavigationOutcome {
        self.navigation.navigate(query_text)
    }

    /// Card view of the held catalog
    pub fn full_view(&self) -> Result<Vec<Node>> {
        let catalog = self.catalog().ok_or(UiError::CatalogNotLoaded)?;
        Ok(cards::full_view(&catalog, &self.navigation))
    }

    /// Compact button row of the held catalog
    pub fn compact_view(&self, max_queries: usize) -> Result<Vec<Node>> {
        let catalog = self.catalog().ok_or(UiError::CatalogNotLoaded)?;
        Ok(cards::compact_view(&catalog, max_queries, &self.navigation))
    }

    /// Replace the container's content with the full card view.
    /// Returns false (after logging) when there is no catalog or no container.
    pub fn render(&self, container_id: &str) -> bool {
        self.mount_view(container_id, self.full_view())
    }

    /// Replace the container's content with the first `max_queries` queries
    /// (default 6) as buttons.
    pub fn render_compact(&self, container_id: &str, max_queries: Option<usize>) -> bool {
        let max_queries = max_queries.unwrap_or(DEFAULT_COMPACT_LIMIT);
        self.mount_view(container_id, self.compact_view(max_queries))
    }

    fn mount_view(&self, container_id: &str, view: Result<Vec<Node>>) -> bool {
        let nodes = match view {
            Ok(nodes) => nodes,
            Err(err) => {
                error!(container = %container_id, "{}", err);
                return false;
            }
        };
        if !self.document.replace_children(container_id, nodes) {
            error!(
                container = %container_id,
                "{}",
                UiError::missing_target(container_id)
            );
            return false;
        }
        true
    }

    /// Install the card style sheet once
    pub fn inject_styles(&self) -> bool {
        ensure_styles(self.document.as_ref(), SAMPLES_STYLE_ID, SAMPLES_CSS)
    }

    /// Page bootstrap: load the catalog, then fill whichever of the
    /// configured containers exist on the page.
    pub async fn mount(&self, config: &SamplesConfig) -> MountReport {
        let mut report = MountReport {
            loaded: self.load_catalog().await.is_some(),
            ..MountReport::default()
        };
        if self.catalog().is_none() {
            return report;
        }

        if self.document.has_element(&config.container_id) {
            report.full = self.render(&config.container_id);
        }
        if self.document.has_element(&config.compact_container_id) {
            report.compact =
                self.render_compact(&config.compact_container_id, Some(config.compact_limit));
        }
        if report.full || report.compact {
            self.inject_styles();
        }

        debug!(?report, "sample browser mounted");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, SampleQuery};
    use crate::memory::{MemoryDocument, MemoryNavigator, StaticCatalogSource};
    use crate::view::DomEvent;

    fn query(text: &str, tags: &[&str]) -> SampleQuery {
        SampleQuery {
            text: text.to_string(),
            description: format!("{} cards", text),
            expected_min: 5,
            expected_max: 20,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn catalog() -> SampleCatalog {
        SampleCatalog {
            samples: vec![
                Category {
                    category: "Creatures".into(),
                    description: "Find creatures".into(),
                    queries: vec![query("red dragon", &["color", "type"]), query("elf druid", &[])],
                },
                Category {
                    category: "Removal".into(),
                    description: "Answers".into(),
                    queries: vec![query("destroy target creature", &["removal"])],
                },
            ],
        }
    }

    struct Fixture {
        document: Rc<MemoryDocument>,
        navigator: Rc<MemoryNavigator>,
        browser: SampleBrowser,
    }

    fn fixture(source: StaticCatalogSource, trigger: Option<SearchTrigger>) -> Fixture {
        let document = Rc::new(MemoryDocument::with_elements([
            "samples-container",
            "compact-samples",
        ]));
        let navigator = Rc::new(MemoryNavigator::new("https://cards.example.com", "/"));
        let browser = SampleBrowser::new(
            Box::new(source),
            document.clone(),
            navigator.clone(),
            trigger,
        );
        Fixture {
            document,
            navigator,
            browser,
        }
    }

    #[tokio::test]
    async fn load_then_render_full_view() {
        let f = fixture(StaticCatalogSource::new().with_response(Ok(catalog())), None);
        assert_eq!(f.browser.load_state(), LoadState::Unloaded);

        let loaded = f.browser.load_catalog().await.unwrap();
        assert_eq!(loaded.query_count(), 3);
        assert_eq!(f.browser.load_state(), LoadState::Loaded);

        assert!(f.browser.render("samples-container"));
        let cards = f.document.by_class("samples-container", "sample-query-card");
        assert_eq!(cards.len(), 3);
        assert_eq!(
            f.document.by_class("samples-container", "sample-category").len(),
            2
        );
        let text = f.document.text("samples-container").unwrap();
        assert!(text.contains(cards::HEADER_TITLE));
        assert!(text.contains("\"red dragon\""));
        assert!(text.contains("5-20 results"));
    }

    #[tokio::test]
    async fn failed_first_load_stays_unloaded() {
        let f = fixture(
            StaticCatalogSource::new().with_response(Err(UiError::status("/samples", 500))),
            None,
        );
        assert!(f.browser.load_catalog().await.is_none());
        assert_eq!(f.browser.load_state(), LoadState::Unloaded);
        assert!(f.browser.catalog().is_none());

        assert!(!f.browser.render("samples-container"));
        assert!(matches!(
            f.browser.full_view(),
            Err(UiError::CatalogNotLoaded)
        ));
        assert_eq!(f.document.text("samples-container").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn failed_reload_keeps_previous_catalog() {
        let source = StaticCatalogSource::new()
            .with_response(Ok(catalog()))
            .with_response(Err(UiError::transport("/samples", "connection reset")));
        let f = fixture(source, None);

        f.browser.load_catalog().await.unwrap();
        assert!(f.browser.load_catalog().await.is_none());

        assert_eq!(f.browser.load_state(), LoadState::Loaded);
        assert_eq!(f.browser.catalog().unwrap().query_count(), 3);
    }

    #[tokio::test]
    async fn invalid_catalog_counts_as_failure() {
        let mut bad = catalog();
        bad.samples[0].queries[0].expected_min = 99;
        let f = fixture(StaticCatalogSource::new().with_response(Ok(bad)), None);

        assert!(f.browser.load_catalog().await.is_none());
        assert_eq!(f.browser.load_state(), LoadState::Unloaded);
    }

    #[tokio::test]
    async fn render_into_missing_container_is_noop() {
        let f = fixture(StaticCatalogSource::new().with_response(Ok(catalog())), None);
        f.browser.load_catalog().await;
        assert!(!f.browser.render("nowhere"));
        assert!(!f.browser.render_compact("nowhere", None));
    }

    #[tokio::test]
    async fn compact_view_takes_prefix_across_categories() {
        let f = fixture(StaticCatalogSource::new().with_response(Ok(catalog())), None);
        f.browser.load_catalog().await;

        assert!(f.browser.render_compact("compact-samples", Some(2)));
        let buttons = f.document.by_class("compact-samples", "compact-query-btn");
        let labels: Vec<_> = buttons.iter().map(|b| b.text_content()).collect();
        assert_eq!(labels, ["red dragon", "elf druid"]);

        // Limit above the query count renders everything
        f.browser.render_compact("compact-samples", Some(50));
        assert_eq!(
            f.document.by_class("compact-samples", "compact-query-btn").len(),
            3
        );

        f.browser.render_compact("compact-samples", Some(0));
        assert!(f
            .document
            .by_class("compact-samples", "compact-query-btn")
            .is_empty());
    }

    #[tokio::test]
    async fn card_click_without_trigger_reloads_page() {
        let f = fixture(StaticCatalogSource::new().with_response(Ok(catalog())), None);
        f.browser.load_catalog().await;
        f.browser.render("samples-container");

        let cards = f.document.by_class("samples-container", "sample-query-card");
        assert_eq!(cards[0].dispatch(&DomEvent::Click), 1);

        let expected = "https://cards.example.com/?q=red%20dragon";
        let history = f.navigator.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].0.query, "red dragon");
        assert_eq!(history[0].1, expected);
        assert_eq!(f.navigator.assigned(), [expected]);
    }

    #[tokio::test]
    async fn keyboard_activation_uses_trigger() {
        let searched = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&searched);
        let trigger: SearchTrigger = Rc::new(move |q: &str| sink.borrow_mut().push(q.to_string()));

        let f = fixture(
            StaticCatalogSource::new().with_response(Ok(catalog())),
            Some(trigger),
        );
        f.browser.load_catalog().await;
        f.browser.render("samples-container");

        let cards = f.document.by_class("samples-container", "sample-query-card");
        cards[2].dispatch(&DomEvent::key("Enter"));
        cards[2].dispatch(&DomEvent::key(" "));
        cards[2].dispatch(&DomEvent::key("Tab"));

        assert_eq!(
            *searched.borrow(),
            ["destroy target creature", "destroy target creature"]
        );
        assert_eq!(f.navigator.history().len(), 2);
        assert!(f.navigator.assigned().is_empty());
    }

    #[test]
    fn navigate_encodes_and_ignores_empty() {
        let f = fixture(StaticCatalogSource::new(), None);

        assert_eq!(f.browser.navigate(""), NavigationOutcome::Ignored);
        assert!(f.navigator.history().is_empty());

        let outcome = f.browser.navigate("t:goblin & o:\"haste\"");
        assert_eq!(
            outcome,
            NavigationOutcome::Reloaded {
                url: "https://cards.example.com/?q=t%3Agoblin%20%26%20o%3A%22haste%22".into()
            }
        );
    }

    #[tokio::test]
    async fn mount_fills_present_containers_and_styles_once() {
        let source = StaticCatalogSource::new()
            .with_response(Ok(catalog()))
            .with_response(Ok(catalog()));
        let f = fixture(source, None);
        f.document.remove_element("compact-samples");

        let report = f.browser.mount(&SamplesConfig::default()).await;
        assert_eq!(
            report,
            MountReport {
                loaded: true,
                full: true,
                compact: false
            }
        );

        f.browser.mount(&SamplesConfig::default()).await;
        assert_eq!(f.document.style_count(SAMPLES_STYLE_ID), 1);
    }

    #[tokio::test]
    async fn mount_after_failure_renders_nothing() {
        let f = fixture(StaticCatalogSource::new(), None);
        let report = f.browser.mount(&SamplesConfig::default()).await;

        assert_eq!(report, MountReport::default());
        assert_eq!(f.document.style_count(SAMPLES_STYLE_ID), 0);
    }
}
