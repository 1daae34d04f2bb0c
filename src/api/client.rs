use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::Result;
use crate::config::Config;
use crate::error::{ApiError, ConfigError};

use super::body::{ErrorBody, body_preview};

const CORRELATION_HEADER: &str = "x-correlation-id";

/// HTTP client for the catalogue backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    token: Option<SecretString>,
    login_path: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build an `ApiClient` for `base`, sending `token` as a bearer
    /// credential on every request when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path or if the
    /// underlying HTTP client fails to build.
    pub fn new(
        base: Url,
        token: Option<SecretString>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidField {
                field: "api.url",
                message: format!("{base} cannot be used as a base URL"),
            }
            .into());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("meddist/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ApiError::Client { source: err })?;

        Ok(Self {
            http,
            base,
            token,
            login_path: None,
        })
    }

    /// Sign-in endpoint relative to the base URL, e.g. `auth/login`.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = Some(path.into());
        self
    }

    /// Replaces the bearer credential for every later request.
    pub fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    pub(super) fn login_segments(&self) -> Result<Vec<&str>> {
        let path = self.login_path.as_deref().ok_or(ConfigError::MissingField {
            field: "api.login_path",
        })?;
        Ok(path.split('/').filter(|segment| !segment.is_empty()).collect())
    }

    /// # Errors
    ///
    /// Same as [`ApiClient::new`].
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(
            config.api_url.clone(),
            config.token.clone(),
            config.http_request_timeout,
            config.http_connect_timeout,
        )?;
        Ok(match &config.login_path {
            Some(path) => client.with_login_path(path.clone()),
            None => client,
        })
    }

    /// `segments` are appended to the base path, so a base of
    /// `https://host/api` and `["products", "7"]` yields `/api/products/7`.
    pub(super) fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(super) async fn send<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let correlation_id = Uuid::now_v7().to_string();
        let request = request
            .header(CORRELATION_HEADER, &correlation_id)
            .build()
            .map_err(ApiError::from)?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let started = Instant::now();

        let response = self.http.execute(request).await.map_err(ApiError::from)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            warn!(
                %method,
                path,
                %correlation_id,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or("-"),
                "backend rejected request"
            );
            return Err(ApiError::Status { status, message }.into());
        }

        let decoded = serde_json::from_slice(&body).map_err(|err| ApiError::Json {
            message: format!(
                "error decoding response body: {err}; body preview: {}",
                body_preview(&body)
            ),
        })?;

        debug!(
            %method,
            path,
            %correlation_id,
            status = status.as_u16(),
            latency_ms = started.elapsed().as_millis(),
            "request succeeded"
        );
        Ok(decoded)
    }
}
