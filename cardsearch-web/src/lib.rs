//! Browser bindings for the card search page
//!
//! Exposes the sample browser and the warm-up indicator to the page's
//! JavaScript, backed by the live DOM, `history`, and `setTimeout`.
//!
//! ```js
//! import init, { initLogging, mountSamples, WarmupHandle } from "./cardsearch_web.js";
//!
//! await init();
//! initLogging();
//! const samples = await mountSamples(null, (query) => runSearch(query));
//! const warmup = new WarmupHandle();
//! warmup.start("search-indicator");
//! ```

#![cfg(target_arch = "wasm32")]

pub mod console;
pub mod dom;
pub mod navigator;
pub mod timers;

use std::rc::Rc;
use std::time::Duration;

use cardsearch_client::ApiClient;
use cardsearch_core::{
    MountReport, NavigationOutcome, SampleBrowser, SearchTrigger, UiConfig, WarmupIndicator,
};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;

pub use console::MakeConsoleWriter;
pub use dom::WebDocument;
pub use navigator::WebNavigator;
pub use timers::GlooScheduler;

/// Install a console subscriber. Calling it twice is harmless.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init()
        .ok();
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn search_trigger(function: js_sys::Function) -> SearchTrigger {
    Rc::new(move |query: &str| {
        if let Err(err) = function.call1(&JsValue::NULL, &JsValue::from_str(query)) {
            warn!(query = %query, error = ?err, "search trigger threw");
        }
    })
}

/// Load the sample catalog and fill whichever containers the page has.
///
/// `api_base_url` defaults to the page's own origin. `search_trigger`, when
/// given, is called with the query text instead of reloading the page.
#[wasm_bindgen(js_name = mountSamples)]
pub async fn mount_samples(
    api_base_url: Option<String>,
    search_trigger_fn: Option<js_sys::Function>,
) -> Result<SamplesHandle, JsValue> {
    let navigator = Rc::new(WebNavigator::from_window()?);
    let document = Rc::new(WebDocument::from_window()?);

    let mut config = UiConfig::default();
    config.api_base_url = match api_base_url {
        Some(url) if !url.trim().is_empty() => url,
        _ => cardsearch_core::Navigator::origin(navigator.as_ref()),
    };
    config.validate().map_err(js_error)?;

    let client = ApiClient::new(&config.api_base_url)
        .map_err(js_error)?
        .with_samples_path(config.samples.endpoint.clone());

    let browser = Rc::new(SampleBrowser::new(
        Box::new(client),
        document,
        navigator,
        search_trigger_fn.map(search_trigger),
    ));
    let report = browser.mount(&config.samples).await;
    info!(loaded = report.loaded, full = report.full, compact = report.compact, "samples mounted");

    Ok(SamplesHandle { browser, report })
}

#[wasm_bindgen]
pub struct SamplesHandle {
    browser: Rc<SampleBrowser>,
    report: MountReport,
}

#[wasm_bindgen]
impl SamplesHandle {
    /// Re-render the full card view into `container_id`
    pub fn render(&self, container_id: &str) -> bool {
        self.browser.render(container_id)
    }

    #[wasm_bindgen(js_name = renderCompact)]
    pub fn render_compact(&self, container_id: &str, max_queries: Option<u32>) -> bool {
        self.browser
            .render_compact(container_id, max_queries.map(|max| max as usize))
    }

    /// Search for `query`. Returns the URL navigated to, or undefined for
    /// empty input.
    pub fn navigate(&self, query: &str) -> Option<String> {
        match self.browser.navigate(query) {
            NavigationOutcome::Searched { url } | NavigationOutcome::Reloaded { url } => Some(url),
            NavigationOutcome::Ignored => None,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.report.loaded
    }

    #[wasm_bindgen(getter)]
    pub fn full(&self) -> bool {
        self.report.full
    }

    #[wasm_bindgen(getter)]
    pub fn compact(&self) -> bool {
        self.report.compact
    }
}

/// Warm-up indicator for one search request at a time
#[wasm_bindgen]
pub struct WarmupHandle {
    indicator: WarmupIndicator,
}

#[wasm_bindgen]
impl WarmupHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(delay_ms: Option<u32>) -> Result<WarmupHandle, JsValue> {
        let document = Rc::new(WebDocument::from_window()?);
        let mut indicator = WarmupIndicator::new(Rc::new(GlooScheduler::new()), document);
        if let Some(ms) = delay_ms {
            indicator = indicator.with_delay(Duration::from_millis(u64::from(ms)));
        }
        Ok(WarmupHandle { indicator })
    }

    /// Call when a search request starts
    pub fn start(&self, target_id: &str) {
        self.indicator.start_timer(target_id);
    }

    /// Call when the request settles, successfully or not
    pub fn cancel(&self) {
        self.indicator.cancel_timer();
    }

    #[wasm_bindgen(js_name = isShown)]
    pub fn is_shown(&self) -> bool {
        self.indicator.is_shown()
    }

    #[wasm_bindgen(js_name = injectStyles)]
    pub fn inject_styles(&self) -> bool {
        self.indicator.inject_styles()
    }
}
