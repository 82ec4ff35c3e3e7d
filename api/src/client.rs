use crate::call::CallSpecBuilder;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::resource::Resource;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How requests are authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Requests carry no credentials.
    LoggedOut,
}

/// Entry point to the API. Cheap to clone; clones share one HTTP client.
#[derive(Debug, Clone)]
pub struct XingApi {
    inner: Arc<ApiInner>,
}

#[derive(Debug)]
struct ApiInner {
    http: reqwest::Client,
    endpoint: Url,
    config: ApiConfig,
    auth: AuthMode,
}

impl XingApi {
    pub fn builder() -> XingApiBuilder {
        XingApiBuilder::default()
    }

    /// Returns a handle to resource `R`, bound to this client.
    pub fn resource<R: Resource>(&self) -> R {
        R::from_api(self.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.inner.auth
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn spec(&self, method: Method, path: impl Into<String>) -> CallSpecBuilder {
        CallSpecBuilder::new(self.clone(), method, path)
    }
}

#[derive(Debug, Default)]
pub struct XingApiBuilder {
    config: ApiConfig,
    endpoint_set: bool,
    auth: Option<AuthMode>,
}

impl XingApiBuilder {
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.api_endpoint = endpoint.into();
        self.endpoint_set = true;
        self
    }

    pub fn logged_out(mut self) -> Self {
        self.auth = Some(AuthMode::LoggedOut);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replaces the whole configuration. The endpoint in `config` counts as
    /// explicitly set.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self.endpoint_set = true;
        self
    }

    pub fn build(self) -> ApiResult<XingApi> {
        if !self.endpoint_set {
            return Err(ApiError::invalid_config("API endpoint must be set"));
        }
        let auth = self.auth.ok_or_else(|| {
            ApiError::invalid_config("Authentication mode must be set, e.g. logged_out()")
        })?;

        self.config.validate().map_err(ApiError::invalid_config)?;

        let endpoint = Url::parse(&self.config.api_endpoint).map_err(|e| {
            ApiError::invalid_config(format!(
                "Invalid API endpoint {}: {}",
                self.config.api_endpoint, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::invalid_config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Built API client for {} ({:?})", endpoint, auth);

        Ok(XingApi {
            inner: Arc::new(ApiInner {
                http,
                endpoint,
                config: self.config,
                auth,
            }),
        })
    }
}
