use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Generic error body returned by the API for non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpError {
    #[serde(default)]
    pub error_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

/// Outcome of executing a [`CallSpec`](crate::CallSpec).
///
/// A response is successful when the status is 2xx. Successful responses may
/// carry a decoded body of type `RT`; no-content responses never do.
/// Unsuccessful responses may carry a decoded error body of type `ET`, and
/// always keep the raw error text when there was any.
#[derive(Debug, Clone)]
pub struct Response<RT, ET> {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<RT>,
    error: Option<ET>,
    raw_error_body: Option<String>,
}

impl<RT, ET> Response<RT, ET> {
    pub(crate) fn success(status: StatusCode, headers: HeaderMap, body: Option<RT>) -> Self {
        Self {
            status,
            headers,
            body,
            error: None,
            raw_error_body: None,
        }
    }

    pub(crate) fn error(
        status: StatusCode,
        headers: HeaderMap,
        error: Option<ET>,
        raw_error_body: Option<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body: None,
            error,
            raw_error_body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&RT> {
        self.body.as_ref()
    }

    pub fn into_body(self) -> Option<RT> {
        self.body
    }

    pub fn error_body(&self) -> Option<&ET> {
        self.error.as_ref()
    }

    pub fn raw_error_body(&self) -> Option<&str> {
        self.raw_error_body.as_deref()
    }
}
