//! Global "request in flight" indicator.

use std::sync::Arc;

use tokio::sync::watch;

/// Counts outstanding requests; loading while any [`SpinnerGuard`] is alive.
#[derive(Clone, Debug)]
pub struct Spinner {
    active: Arc<watch::Sender<usize>>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            active: Arc::new(tx),
        }
    }

    #[must_use = "the spinner hides again as soon as the guard is dropped"]
    pub fn show(&self) -> SpinnerGuard {
        self.active.send_modify(|count| *count += 1);
        SpinnerGuard {
            active: Arc::clone(&self.active),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.active.borrow() > 0
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.active.subscribe()
    }
}

#[derive(Debug)]
pub struct SpinnerGuard {
    active: Arc<watch::Sender<usize>>,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.active
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::Spinner;

    #[test]
    fn guard_controls_visibility() {
        let spinner = Spinner::new();
        assert!(!spinner.is_loading());
        let guard = spinner.show();
        assert!(spinner.is_loading());
        drop(guard);
        assert!(!spinner.is_loading());
    }

    #[test]
    fn overlapping_requests_keep_spinner_up() {
        let spinner = Spinner::new();
        let first = spinner.show();
        let second = spinner.clone().show();
        drop(first);
        assert!(spinner.is_loading());
        drop(second);
        assert!(!spinner.is_loading());
    }
}
