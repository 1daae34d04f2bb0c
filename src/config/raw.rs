use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;
use url::Url;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{default_api_url, default_connect_timeout, default_request_timeout};
use super::env::{env_duration, env_string};
use super::{Config, HumantimeDuration, Overrides};

pub(super) fn load(
    path: impl AsRef<Path>,
    required: bool,
) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    if required && !path.exists() {
        return Err(ConfigError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    ::config::Config::builder()
        .add_source(::config::File::from(path).required(required))
        .add_source(
            ::config::Environment::with_prefix("MEDDIST")
                .separator("__")
                .try_parsing(false),
        )
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) api: RawApi,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawApi {
    #[serde(default = "default_api_url")]
    pub(super) url: String,
    #[serde(default)]
    pub(super) token: Option<String>,
    /// Path of the sign-in endpoint, relative to `url`.
    #[serde(default)]
    pub(super) login_path: Option<String>,
    #[serde(default = "default_request_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) request_timeout: Duration,
    #[serde(default = "default_connect_timeout")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) connect_timeout: Duration,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(url) = env_string("MEDDIST_API_URL")? {
            self.api.url = url;
        }
        if let Some(token) = env_string("MEDDIST_TOKEN")? {
            self.api.token = Some(token);
        }
        if let Some(path) = env_string("MEDDIST_LOGIN_PATH")? {
            self.api.login_path = Some(path);
        }
        if let Some(timeout) = env_duration("MEDDIST_HTTP_TIMEOUT")? {
            self.api.request_timeout = timeout;
        }
        if let Some(timeout) = env_duration("MEDDIST_CONNECT_TIMEOUT")? {
            self.api.connect_timeout = timeout;
        }
        Ok(())
    }

    pub(super) fn apply_cli_overrides(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.api_url {
            self.api.url = url;
        }
        if let Some(token) = overrides.token {
            self.api.token = Some(token);
        }
        if let Some(path) = overrides.login_path {
            self.api.login_path = Some(path);
        }
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let api_url = Url::parse(self.api.url.trim()).map_err(|err| ConfigError::InvalidField {
            field: "api.url",
            message: err.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidField {
                field: "api.url",
                message: format!("unsupported scheme `{}`", api_url.scheme()),
            }
            .into());
        }

        let token = match self.api.token {
            Some(token) if token.trim().is_empty() => {
                return Err(ConfigError::InvalidField {
                    field: "api.token",
                    message: "token cannot be empty".to_string(),
                }
                .into());
            }
            Some(token) => Some(token.trim().to_string().into()),
            None => None,
        };

        let login_path = match self.api.login_path {
            Some(path) => {
                let path = path.trim().trim_matches('/');
                if path.is_empty() {
                    return Err(ConfigError::InvalidField {
                        field: "api.login_path",
                        message: "login path cannot be empty".to_string(),
                    }
                    .into());
                }
                Some(path.to_string())
            }
            None => None,
        };

        if self.api.request_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "api.request_timeout",
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }
        if self.api.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "api.connect_timeout",
                message: "timeout must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            api_url,
            token,
            login_path,
            http_request_timeout: self.api.request_timeout,
            http_connect_timeout: self.api.connect_timeout,
        })
    }
}

impl Default for RawApi {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            token: None,
            login_path: None,
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}
