//! Server warm-up indicator
//!
//! Serverless backends can take several seconds to answer after a period of
//! inactivity. The indicator arms one delayed callback when a request starts;
//! if the request is still running when it fires, the search indicator
//! element switches to a "Server warming up..." message.
//!
//! Callers must cancel on both the success and failure paths of the request,
//! otherwise the message can appear after the request already resolved.
//!
//! ```text
//!            start_timer             delay elapsed
//!   idle ───────────────▶ armed ───────────────────▶ shown
//!    ▲                      │                          │
//!    └──── cancel_timer ────┴────── cancel_timer ──────┘
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::config::WarmupConfig;
use crate::host::{Document, Scheduler, TimerId};
use crate::styles::{ensure_styles, WARMUP_CSS, WARMUP_STYLE_ID};
use crate::view::{div, Node};

pub const DEFAULT_WARMUP_DELAY: Duration = Duration::from_millis(5000);

/// Observable state of the indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmupState {
    /// Pending delayed callback, if armed
    pub timer: Option<TimerId>,
    /// Whether the warming-up message is on screen for the current period
    pub shown: bool,
}

pub struct WarmupIndicator {
    state: Rc<RefCell<WarmupState>>,
    // Bumped on every arm/cancel so a callback from an older period is inert
    epoch: Rc<Cell<u64>>,
    scheduler: Rc<dyn Scheduler>,
    document: Rc<dyn Document>,
    delay: Duration,
}

impl WarmupIndicator {
    pub fn new(scheduler: Rc<dyn Scheduler>, document: Rc<dyn Document>) -> Self {
        Self {
            state: Rc::new(RefCell::new(WarmupState::default())),
            epoch: Rc::new(Cell::new(0)),
            scheduler,
            document,
            delay: DEFAULT_WARMUP_DELAY,
        }
    }

    pub fn from_config(
        config: &WarmupConfig,
        scheduler: Rc<dyn Scheduler>,
        document: Rc<dyn Document>,
    ) -> Self {
        Self::new(scheduler, document).with_delay(config.delay())
    }

    /// Builder: override the 5 second default
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> WarmupState {
        *self.state.borrow()
    }

    pub fn is_shown(&self) -> bool {
        self.state.borrow().shown
    }

    /// Arm the delay for a request that just started. Any pending timer is
    /// cancelled first, so only the latest call decides if and when the
    /// message appears.
    pub fn start_timer(&self, target: &str) {
        self.cancel_timer();

        let epoch = self.epoch.get();
        let state = Rc::clone(&self.state);
        let current = Rc::clone(&self.epoch);
        let document = Rc::clone(&self.document);
        let target = target.to_string();

        let id = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                if current.get() != epoch {
                    return;
                }
                show_warmup(&state, document.as_ref(), &target);
            }),
        );

        self.state.borrow_mut().timer = Some(id);
        debug!(timer = id.0, delay_ms = self.delay.as_millis() as u64, "warm-up timer armed");
    }

    /// Drop any pending delay and reset. Safe to call when nothing is armed.
    pub fn cancel_timer(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        let pending = {
            let mut state = self.state.borrow_mut();
            state.shown = false;
            state.timer.take()
        };
        if let Some(id) = pending {
            self.scheduler.cancel(id);
        }
    }

    /// Install the warm-up style sheet once
    pub fn inject_styles(&self) -> bool {
        ensure_styles(self.document.as_ref(), WARMUP_STYLE_ID, WARMUP_CSS)
    }
}

fn show_warmup(state: &RefCell<WarmupState>, document: &dyn Document, target: &str) {
    {
        let mut state = state.borrow_mut();
        state.timer = None;
        if state.shown {
            return;
        }
        if !document.has_element(target) {
            debug!(target_id = %target, "warm-up target missing, nothing to update");
            return;
        }
        state.shown = true;
    }

    document.replace_children(target, vec![warmup_message()]);
    ensure_styles(document, WARMUP_STYLE_ID, WARMUP_CSS);
    debug!(target_id = %target, "warm-up message shown");
}

/// The message that replaces the search indicator's content
pub fn warmup_message() -> Node {
    div()
        .class("warmup-message")
        .child(div().class("spinner"))
        .child(
            div()
                .class("warmup-text")
                .child(div().text("Server warming up..."))
                .child(
                    div()
                        .class("warmup-subtext")
                        .text("This may take a moment after inactivity"),
                ),
        )
        .into()
}
