//! Screen workflows: each backend call raises the spinner, and its outcome is
//! reported through the toast queue.

mod categories;
mod channels;
mod locations;
mod login;
mod products;

use std::future::Future;

use tracing::error;

use crate::Result;
use crate::context::AppContext;
use crate::error::Error;
use crate::types::FormMode;

pub use categories::CategoriesScreen;
pub use channels::ChannelsScreen;
pub use locations::LocationsScreen;
pub use login::LoginScreen;
pub use products::ProductsScreen;

pub(crate) const UNKNOWN_ERROR: &str =
    "Um erro desconhecido aconteceu. Aguarde alguns segundos e tente novamente";

/// Position in a paginated listing. Pages are 1-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    current: u32,
    total: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            total: 0,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn new(current: u32, total: u32) -> Self {
        Self { current, total }
    }

    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total
    }

    #[must_use]
    pub const fn next(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.current + 1)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn previous(&self) -> Option<u32> {
        if self.has_previous() {
            Some(self.current - 1)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!("Página {} de {}", self.current, self.total)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Failure {
    Fixed(&'static str),
    /// `Erro: <message>` when the backend explained itself.
    ServerMessage,
    /// `<prefix>: <message>`, falling back to the error itself.
    Prefixed(&'static str),
}

impl Failure {
    fn message(self, err: &Error) -> String {
        match self {
            Self::Fixed(message) => message.to_string(),
            Self::ServerMessage => err
                .server_message()
                .map_or_else(|| UNKNOWN_ERROR.to_string(), |m| format!("Erro: {m}")),
            Self::Prefixed(prefix) => match err.server_message() {
                Some(message) => format!("{prefix}: {message}"),
                None => format!("{prefix}: {err}"),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Feedback {
    pub(crate) action: &'static str,
    pub(crate) success: Option<&'static str>,
    pub(crate) failure: Failure,
}

impl Feedback {
    pub(crate) const fn failing(action: &'static str, failure: &'static str) -> Self {
        Self {
            action,
            success: None,
            failure: Failure::Fixed(failure),
        }
    }

    pub(crate) const fn saving(
        mode: &FormMode,
        created: &'static str,
        updated: &'static str,
        failure: &'static str,
    ) -> Self {
        let (action, success) = match mode {
            FormMode::Create => ("create", created),
            FormMode::Edit(_) => ("update", updated),
        };
        Self {
            action,
            success: Some(success),
            failure: Failure::Fixed(failure),
        }
    }
}

pub(crate) async fn with_feedback<T>(
    ctx: &AppContext,
    feedback: Feedback,
    request: impl Future<Output = Result<T>>,
) -> Result<T> {
    let _spinner = ctx.spinner.show();
    match request.await {
        Ok(value) => {
            if let Some(message) = feedback.success {
                ctx.toasts.success(message);
            }
            Ok(value)
        }
        Err(err) => {
            error!(action = feedback.action, error = %err, "request failed");
            ctx.toasts.error(feedback.failure.message(&err));
            Err(err)
        }
    }
}
