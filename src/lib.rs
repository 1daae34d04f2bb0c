#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod forms;
pub mod screens;
pub mod spinner;
pub mod telemetry;
pub mod toast;
pub mod types;
pub mod validation;

pub use context::AppContext;

pub type Result<T> = std::result::Result<T, error::Error>;
