//! `setTimeout`-backed scheduler
//!
//! A gloo `Timeout` clears its browser timer when dropped, so pending
//! timeouts are held in a map until they fire or are cancelled. A firing
//! callback cannot drop its own `Timeout`; it records its id instead and the
//! entry is pruned on the next schedule or cancel.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use cardsearch_core::{Scheduler, TimerId};
use gloo_timers::callback::Timeout;

#[derive(Default)]
pub struct GlooScheduler {
    next_id: Cell<u64>,
    pending: RefCell<HashMap<TimerId, Timeout>>,
    fired: Rc<RefCell<Vec<TimerId>>>,
}

impl GlooScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks scheduled and not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.prune();
        self.pending.borrow().len()
    }

    fn prune(&self) {
        let fired: Vec<TimerId> = self.fired.borrow_mut().drain(..).collect();
        if fired.is_empty() {
            return;
        }
        let mut pending = self.pending.borrow_mut();
        for id in fired {
            pending.remove(&id);
        }
    }
}

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        self.prune();

        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let fired = Rc::clone(&self.fired);
        let timeout = Timeout::new(millis, move || {
            fired.borrow_mut().push(id);
            task();
        });
        self.pending.borrow_mut().insert(id, timeout);
        id
    }

    fn cancel(&self, id: TimerId) {
        self.prune();
        if let Some(timeout) = self.pending.borrow_mut().remove(&id) {
            timeout.cancel();
        }
    }
}
