pub mod cards;
pub mod catalog;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod samples;
pub mod styles;
pub mod view;
pub mod warmup;

#[cfg(feature = "rt")]
pub mod runtime;

pub use catalog::{Category, FlatQuery, SampleCatalog, SampleQuery};
pub use config::{join_url, SamplesConfig, UiConfig, WarmupConfig};
pub use error::{Result, UiError};
pub use host::{
    CatalogSource, Document, HistoryState, Navigator, Scheduler, SearchTrigger, TimerId,
};
pub use samples::{
    LoadState, MountReport, NavigationOutcome, SampleBrowser, SampleNavigation,
    DEFAULT_COMPACT_LIMIT,
};
pub use view::{Callback, DomEvent, Element, Node, Trigger};
pub use warmup::{WarmupIndicator, WarmupState, DEFAULT_WARMUP_DELAY};

#[cfg(feature = "rt")]
pub use runtime::TokioScheduler;
