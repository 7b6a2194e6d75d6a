//! Tokio-backed scheduler for native hosts
//!
//! Tasks are spawned with `spawn_local`, so the scheduler must be used from
//! inside a [`tokio::task::LocalSet`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::host::{Scheduler, TimerId};

#[derive(Default)]
pub struct TokioScheduler {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<TimerId, JoinHandle<()>>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks scheduled and not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let tasks = Rc::clone(&self.tasks);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            // Deregister before running so the task may schedule again
            tasks.borrow_mut().remove(&id);
            task();
        });
        self.tasks.borrow_mut().insert(id, handle);
        trace!(timer = id.0, delay_ms = delay.as_millis() as u64, "scheduled");
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.tasks.borrow_mut().remove(&id) {
            handle.abort();
            trace!(timer = id.0, "cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.borrow_mut().drain() {
            handle.abort();
        }
    }
}
