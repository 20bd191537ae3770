//! Surface event types and the armed/disarmed delivery queue.

use std::sync::{Arc, Mutex};

/// Generic event code for page-load completion, as seen by the host.
pub const EVENT_DOM_CONTENT_LOADED: u32 = 1;

/// Events emitted by the rendering control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The page finished loading.
    LoadComplete,
    /// In-page script called `window.external.notify(value)`.
    ScriptNotify(String),
}

#[derive(Default)]
struct QueueState {
    armed: bool,
    pending: Vec<SurfaceEvent>,
}

/// Event sink shared between the control's handlers and the run loop.
///
/// Subscriptions are scoped to one run-loop invocation: the queue only
/// observes events while armed, and disarming drops anything still
/// pending, so no event raised outside the loop ever reaches the host.
#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Arc<Mutex<QueueState>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Dropped silently unless the queue is armed.
    pub fn push(&self, event: SurfaceEvent) {
        if let Ok(mut state) = self.inner.lock() {
            if state.armed {
                state.pending.push(event);
            } else {
                tracing::debug!(?event, "control event dropped outside run loop");
            }
        }
    }

    /// Start observing events. Anything queued while disarmed is gone.
    pub fn arm(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.armed = true;
            state.pending.clear();
        }
    }

    /// Stop observing events and discard whatever was not drained.
    pub fn disarm(&self) {
        if let Ok(mut state) = self.inner.lock() {
            state.armed = false;
            state.pending.clear();
        }
    }

    /// Take all pending events.
    pub fn drain(&self) -> Vec<SurfaceEvent> {
        match self.inner.lock() {
            Ok(mut state) => std::mem::take(&mut state.pending),
            Err(_) => Vec::new(),
        }
    }
}
