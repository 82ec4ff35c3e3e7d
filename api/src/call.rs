use crate::client::XingApi;
use crate::error::{ApiError, ApiResult};
use crate::response::{HttpError, Response};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
enum RequestBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// Collects the pieces of a request before it is frozen into a [`CallSpec`].
///
/// Path templates use `{name}` segments which are filled in by
/// [`path_param`](Self::path_param). Values are percent-encoded as a single
/// path segment.
#[derive(Debug)]
pub struct CallSpecBuilder {
    api: XingApi,
    method: Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl CallSpecBuilder {
    pub(crate) fn new(api: XingApi, method: Method, path: impl Into<String>) -> Self {
        Self {
            api,
            method,
            path: path.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn path_param(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query_param(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query_param_opt<T: fmt::Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query_param(name, value),
            None => self,
        }
    }

    pub fn form_field(mut self, name: &str, value: impl fmt::Display) -> Self {
        let field = (name.to_string(), value.to_string());
        match &mut self.body {
            RequestBody::Form(fields) => fields.push(field),
            _ => self.body = RequestBody::Form(vec![field]),
        }
        self
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Freezes the request into a spec whose success body is decoded as `RT`.
    pub fn build<RT, ET>(self) -> CallSpec<RT, ET> {
        self.freeze(true)
    }

    /// Freezes the request into a spec that never decodes a success body.
    pub fn build_void<ET>(self) -> CallSpec<(), ET> {
        self.freeze(false)
    }

    fn freeze<RT, ET>(self, decode_body: bool) -> CallSpec<RT, ET> {
        CallSpec {
            api: self.api,
            method: self.method,
            path: self.path,
            path_params: self.path_params,
            query: self.query,
            body: self.body,
            decode_body,
            _types: PhantomData,
        }
    }
}

/// A deferred HTTP call against the API.
///
/// Nothing is sent until [`execute`](Self::execute) is awaited. `RT` is the
/// success body type and `ET` the error body type.
pub struct CallSpec<RT, ET = HttpError> {
    api: XingApi,
    method: Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: RequestBody,
    decode_body: bool,
    _types: PhantomData<fn() -> (RT, ET)>,
}

impl<RT, ET> CallSpec<RT, ET> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path_template(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn url(&self) -> ApiResult<Url> {
        let mut segments = Vec::new();
        for segment in self.path.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => {
                    let value = self
                        .path_params
                        .iter()
                        .find(|(param, _)| param == name)
                        .map(|(_, value)| value.as_str())
                        .ok_or_else(|| {
                            ApiError::invalid_request(format!(
                                "Unresolved path parameter {{{}}} in {}",
                                name, self.path
                            ))
                        })?;
                    if value.is_empty() {
                        return Err(ApiError::invalid_request(format!(
                            "Path parameter {{{}}} cannot be empty",
                            name
                        )));
                    }
                    segments.push(value);
                }
                None => segments.push(segment),
            }
        }

        let mut url = self.api.endpoint().clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_request("API endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl<RT, ET> CallSpec<RT, ET>
where
    RT: DeserializeOwned,
    ET: DeserializeOwned,
{
    /// Sends the request and waits for the response.
    ///
    /// Transport failures surface as [`ApiError::Network`]. Non-2xx statuses
    /// are not errors at this level; they come back as an unsuccessful
    /// [`Response`].
    pub async fn execute(self) -> ApiResult<Response<RT, ET>> {
        let url = self.url()?;
        debug!("Executing {} {}", self.method, url);

        let mut request = self.api.http().request(self.method.clone(), url.clone());
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        request = match &self.body {
            RequestBody::Empty => request,
            RequestBody::Form(fields) => request.form(fields),
            RequestBody::Json(value) => request.json(value),
        };

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;

        if status.is_success() {
            let body = if !self.decode_body || bytes.is_empty() {
                None
            } else {
                Some(serde_json::from_slice(&bytes)?)
            };
            info!("{} {} completed with {}", self.method, url, status);
            Ok(Response::success(status, headers, body))
        } else {
            let raw_error_body = if bytes.is_empty() {
                None
            } else {
                Some(String::from_utf8_lossy(&bytes).into_owned())
            };
            let error = raw_error_body
                .as_deref()
                .and_then(|text| serde_json::from_str(text).ok());
            warn!("{} {} failed with {}", self.method, url, status);
            Ok(Response::error(status, headers, error, raw_error_body))
        }
    }
}

impl<RT, ET> Clone for CallSpec<RT, ET> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            method: self.method.clone(),
            path: self.path.clone(),
            path_params: self.path_params.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            decode_body: self.decode_body,
            _types: PhantomData,
        }
    }
}

impl<RT, ET> fmt::Debug for CallSpec<RT, ET> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallSpec")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("path_params", &self.path_params)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("decode_body", &self.decode_body)
            .finish()
    }
}
