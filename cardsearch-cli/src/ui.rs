//! Terminal UI helpers for the cardsearch CLI
//!
//! # Quiet Mode
//!
//! Progress spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `CARDSEARCH_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::cell::RefCell;
use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use cardsearch_core::{Document, Node};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Element id the search spinner answers to
pub const SEARCH_INDICATOR_ID: &str = "search-indicator";

static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from flags and environment
///
/// Call this once at startup with the --quiet flag value.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("CARDSEARCH_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

/// Finish a spinner with a success message
pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid template"),
        );
        pb.finish_with_message(format!("✓ {}", msg.into()));
    }
}

/// Finish a spinner with an error message
pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    if let Some(pb) = pb {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg}")
                .expect("valid template"),
        );
        pb.finish_with_message(format!("✗ {}", msg.into()));
    }
}

/// A one-element document backed by the terminal spinner.
///
/// The warm-up indicator addresses it as `search-indicator`; whatever view it
/// mounts there becomes the spinner message, flattened to one line.
pub struct SpinnerDocument {
    spinner: Option<ProgressBar>,
    styles: RefCell<Vec<String>>,
}

impl SpinnerDocument {
    pub fn new(spinner: Option<ProgressBar>) -> Self {
        Self {
            spinner,
            styles: RefCell::new(Vec::new()),
        }
    }

    /// Handle to the underlying spinner for finishing
    pub fn spinner(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Current message, or None in quiet mode
    pub fn message(&self) -> Option<String> {
        self.spinner.as_ref().map(|pb| pb.message())
    }
}

impl Document for SpinnerDocument {
    fn has_element(&self, id: &str) -> bool {
        id == SEARCH_INDICATOR_ID
    }

    fn replace_children(&self, id: &str, nodes: Vec<Node>) -> bool {
        if !self.has_element(id) {
            return false;
        }
        let line = nodes
            .iter()
            .flat_map(|node| node.text_fragments())
            .collect::<Vec<_>>()
            .join(" · ");
        match &self.spinner {
            Some(pb) => pb.set_message(line),
            None => debug!(message = %line, "search indicator updated"),
        }
        true
    }

    // Terminals have no style sheets; ids are only tracked for idempotence
    fn has_style(&self, style_id: &str) -> bool {
        self.styles.borrow().iter().any(|id| id == style_id)
    }

    fn append_style(&self, style_id: &str, _css: &str) {
        self.styles.borrow_mut().push(style_id.to_string());
    }
}
