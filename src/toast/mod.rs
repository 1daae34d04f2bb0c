//! Transient user-facing notifications.
//!
//! Toasts are appended in call order and each one schedules its own removal
//! [`TOAST_TTL`] after insertion. Dismissing a toast early leaves its timer
//! running; the timer then finds nothing to remove.

mod queue;

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::types::Severity;

pub use queue::{Toast, ToastId, ToastQueue};

pub const TOAST_TTL: Duration = Duration::from_millis(5_000);

/// Shared handle to the toast queue. Clones observe the same queue.
#[derive(Clone, Debug)]
pub struct Toasts {
    state: Arc<watch::Sender<ToastQueue>>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ToastQueue::default());
        Self {
            state: Arc::new(tx),
        }
    }

    /// Queue a toast and schedule its expiry on the current tokio runtime.
    /// Outside a runtime the toast is still queued but stays until removed.
    pub fn add(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let toast = Toast::new(message.into(), severity);
        let id = toast.id();
        debug!(%id, %severity, message = toast.message(), "toast queued");
        self.state.send_modify(|queue| queue.push(toast));

        match Handle::try_current() {
            Ok(runtime) => {
                let state = Arc::downgrade(&self.state);
                runtime.spawn(async move {
                    sleep(TOAST_TTL).await;
                    expire(&state, id);
                });
            }
            Err(err) => warn!(%id, error = %err, "no tokio runtime, toast will not expire"),
        }
        id
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.add(message, Severity::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.add(message, Severity::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.add(message, Severity::Info)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.add(message, Severity::Warning)
    }

    pub fn remove(&self, id: ToastId) {
        if self.state.send_if_modified(|queue| queue.remove(id)) {
            debug!(%id, "toast dismissed");
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Toast> {
        self.state.borrow().iter().cloned().collect()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ToastQueue> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }
}

fn expire(state: &Weak<watch::Sender<ToastQueue>>, id: ToastId) {
    let Some(state) = state.upgrade() else {
        return;
    };
    if state.send_if_modified(|queue| queue.remove(id)) {
        debug!(%id, "toast expired");
    }
}
