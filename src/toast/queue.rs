use std::fmt;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::types::Severity;

/// Opaque toast identifier, generated when the toast is queued.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ToastId(Uuid);

impl ToastId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    id: ToastId,
    message: String,
    severity: Severity,
    created_at: DateTime<Local>,
}

impl Toast {
    pub(super) fn new(message: String, severity: Severity) -> Self {
        Self {
            id: ToastId::generate(),
            message,
            severity,
            created_at: Local::now(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    items: Vec<Toast>,
}

impl ToastQueue {
    pub(super) fn push(&mut self, toast: Toast) {
        self.items.push(toast);
    }

    /// Returns `false` when `id` was not queued.
    pub(super) fn remove(&mut self, id: ToastId) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
