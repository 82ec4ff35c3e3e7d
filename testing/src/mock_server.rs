//! In-process HTTP server that answers requests from a queue of canned
//! responses.
//!
//! Each request is recorded, then answered with the next queued
//! [`MockResponse`]. When nothing is queued the connection is closed without
//! a response, so the client sees a transport error instead of a default
//! reply.

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{HeaderMap, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum MockServerError {
    #[error("No queued response for {method} {path}")]
    QueueExhausted { method: Method, path: String },

    #[error("Invalid mock status code: {code}")]
    InvalidStatus { code: u16 },

    #[error("Invalid mock header: {name}")]
    InvalidHeader { name: String },

    #[error("Failed to read request body: {0}")]
    Body(#[from] hyper::Error),
}

/// A canned response. Defaults to `200 OK` with an empty body.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }
}

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into());
        self
    }

    pub fn with_json_body(self, body: impl Into<String>) -> Self {
        self.with_header(CONTENT_TYPE.as_str(), "application/json")
            .with_body(body)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    fn into_response(self) -> Result<Response<Full<Bytes>>, MockServerError> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|_| MockServerError::InvalidStatus { code: self.status })?;

        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = status;
        for (name, value) in self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MockServerError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| MockServerError::InvalidHeader { name: name.clone() })?;
            response.headers_mut().append(header_name, header_value);
        }
        Ok(response)
    }
}

/// A request as the server received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path including the query string, e.g. `/v1/users/me?limit=10`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body_utf8(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The path without its query string.
    pub fn path_only(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }
}

#[derive(Debug, Default)]
struct Shared {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<VecDeque<RecordedRequest>>,
    request_count: Mutex<usize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Queue-driven mock HTTP server bound to `127.0.0.1` on a free port.
///
/// The accept loop runs on the current tokio runtime and is aborted when the
/// server is dropped.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shared = Arc::new(Shared::default());
        let accept_shared = Arc::clone(&shared);

        let handle = tokio::spawn(async move {
            loop {
                let stream = match listener.accept().await {
                    Ok((stream, _)) => stream,
                    Err(err) => {
                        warn!("Mock server stopped accepting connections: {}", err);
                        break;
                    }
                };
                let shared = Arc::clone(&accept_shared);
                tokio::spawn(async move {
                    let service =
                        service_fn(move |request| dispatch(Arc::clone(&shared), request));
                    if let Err(err) = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await
                    {
                        debug!("Mock server connection closed: {}", err);
                    }
                });
            }
        });

        info!("Mock server listening on {}", addr);
        Ok(Self {
            addr,
            shared,
            handle,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.addr, path.trim_start_matches('/'))
    }

    pub fn enqueue(&self, response: MockResponse) {
        debug!("Mock server queued a {} response", response.status());
        lock(&self.shared.responses).push_back(response);
    }

    pub fn queued_responses(&self) -> usize {
        lock(&self.shared.responses).len()
    }

    /// Removes and returns the oldest recorded request.
    pub fn take_request(&self) -> Option<RecordedRequest> {
        lock(&self.shared.requests).pop_front()
    }

    /// Number of requests received so far, including ones already taken.
    pub fn request_count(&self) -> usize {
        *lock(&self.shared.request_count)
    }

    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn dispatch(
    shared: Arc<Shared>,
    request: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, MockServerError> {
    let (parts, body) = request.into_parts();
    let body = body.collect().await?.to_bytes();
    let path = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());

    debug!("Mock server received {} {}", parts.method, path);
    *lock(&shared.request_count) += 1;
    lock(&shared.requests).push_back(RecordedRequest {
        method: parts.method.clone(),
        path: path.clone(),
        headers: parts.headers,
        body,
    });

    let next = lock(&shared.responses).pop_front();
    match next {
        Some(response) => response.into_response(),
        None => {
            warn!("Mock server has no queued response for {} {}", parts.method, path);
            Err(MockServerError::QueueExhausted {
                method: parts.method,
                path,
            })
        }
    }
}
