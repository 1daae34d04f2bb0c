use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

/// Every variant is a "request failed" from the user's point of view; the
/// split only matters for logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client")]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status: {status}")]
    Status {
        status: reqwest::StatusCode,
        message: Option<String>,
    },
    #[error("invalid JSON payload: {message}")]
    Json { message: String },
    #[error("failed to read upload {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_status() {
            if let Some(status) = source.status() {
                return Self::Status {
                    status,
                    message: None,
                };
            }
        }
        Self::Request { source }
    }
}

impl ApiError {
    /// The `message` field of the backend's error body, when it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl Error {
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.server_message(),
            _ => None,
        }
    }
}
