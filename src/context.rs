use crate::spinner::Spinner;
use crate::toast::Toasts;

/// Application-wide UI state, created once at start-up and handed to every
/// screen by reference.
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub toasts: Toasts,
    pub spinner: Spinner,
}

impl AppContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
