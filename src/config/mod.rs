use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::error::Error as MeddistError;

mod defaults;
mod env;
mod raw;
mod serde;

pub(crate) use self::serde::HumantimeDuration;

pub const DEFAULT_CONFIG_FILE: &str = "meddist.toml";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub token: Option<SecretString>,
    /// Sign-in endpoint relative to `api_url`, without surrounding slashes.
    pub login_path: Option<String>,
    pub http_request_timeout: Duration,
    pub http_connect_timeout: Duration,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub login_path: Option<String>,
}

impl Config {
    /// Load configuration from a file, the environment and `overrides`.
    ///
    /// A missing file is only an error when `required` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be read or parsed,
    /// when environment overrides are invalid, or when the resulting values
    /// fail validation.
    pub fn from_env_and_file(
        path: impl AsRef<Path>,
        required: bool,
        overrides: Overrides,
    ) -> Result<Self> {
        let mut raw = raw::load(path, required).map_err(MeddistError::from)?;
        raw.apply_env_overrides().map_err(MeddistError::from)?;
        raw.apply_cli_overrides(overrides);
        raw.validate_and_build()
    }
}
