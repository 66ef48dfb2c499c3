//! Shared HTTP client with session-aware interceptors.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every endpoint wrapper in `api` funnels through [`ApiClient::send`], which
//! runs the same pipeline for each call:
//!
//! 1. build the request (base URL, JSON body, per-call options),
//! 2. outgoing interceptor: attach `Authorization: Bearer <token>` when a
//!    token is persisted,
//! 3. hand the request to the [`Transport`],
//! 4. incoming interceptor: map non-2xx to [`ApiError::Status`] and, on 401
//!    outside the login page, log the session out and fire the unauthorized
//!    callback.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried. Transport failures and non-401 statuses come back to
//! the caller untouched.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::ApiConfig;
use super::types::ErrorBody;
use crate::state::auth::SessionStore;
use crate::util::location::PageLocation;

/// Page on which a 401 is expected and must not trigger a session teardown.
pub const LOGIN_PATH: &str = "/login";

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully prepared request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_owned(), value.into()));
    }
}

/// Raw response: status plus the body as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(ApiError::Decode)
    }
}

/// Per-call overrides threaded through an endpoint wrapper.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("http transport is not available outside the browser")]
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Executes prepared requests.
///
/// Implementations are driven from the UI thread and may return `!Send`
/// futures.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

type UnauthorizedHandler = Rc<dyn Fn()>;

struct ClientInner<T> {
    config: ApiConfig,
    transport: T,
    session: SessionStore,
    location: Rc<dyn PageLocation>,
    on_unauthorized: RefCell<Option<UnauthorizedHandler>>,
}

/// HTTP client shared by every page. Clones share configuration, transport,
/// session, and the unauthorized callback.
pub struct ApiClient<T> {
    inner: Rc<ClientInner<T>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: ApiConfig, transport: T, session: SessionStore, location: impl PageLocation + 'static) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                session,
                location: Rc::new(location),
                on_unauthorized: RefCell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Register the callback fired after a 401 has logged the session out.
    /// Replaces any previous callback.
    pub fn on_unauthorized(&self, handler: impl Fn() + 'static) {
        *self.inner.on_unauthorized.borrow_mut() = Some(Rc::new(handler));
    }

    /// Build a request without sending it. Runs the outgoing interceptor.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ApiRequest, ApiError> {
        let body = body.map(serde_json::to_string).transpose().map_err(ApiError::Encode)?;
        let mut request = ApiRequest {
            method,
            url: self.inner.config.url(path),
            headers: vec![(CONTENT_TYPE.to_owned(), "application/json".to_owned())],
            body,
            timeout: options.timeout.unwrap_or(self.inner.config.timeout),
        };
        for (name, value) in &options.headers {
            request.set_header(name, value.clone());
        }
        self.authorize(&mut request);
        Ok(request)
    }

    /// Send a request with an optional JSON body through both interceptors.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for encode failures, transport failures, and
    /// every non-2xx status.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.prepare(method, path, body, options)?;
        log::debug!("{} {}", request.method.as_str(), request.url);
        let outcome = self.inner.transport.send(request).await;
        self.inspect(outcome)
    }

    /// Send a request that has no body.
    ///
    /// # Errors
    ///
    /// See [`Self::send`].
    pub async fn send_empty(&self, method: Method, path: &str, options: &RequestOptions) -> Result<ApiResponse, ApiError> {
        self.send::<()>(method, path, None, options).await
    }

    fn authorize(&self, request: &mut ApiRequest) {
        if let Some(token) = self.inner.session.persisted_token() {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }
    }

    fn inspect(&self, outcome: Result<ApiResponse, TransportError>) -> Result<ApiResponse, ApiError> {
        let response = outcome?;
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 {
            self.handle_unauthorized();
        }
        Err(ApiError::Status { status: response.status, message: error_message(&response) })
    }

    fn handle_unauthorized(&self) {
        let path = self.inner.location.pathname();
        if path.contains(LOGIN_PATH) {
            return;
        }
        log::warn!("received 401 on {path}; clearing session");
        self.inner.session.logout();
        let handler = self.inner.on_unauthorized.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

/// Backend `error` field when present, otherwise the raw body.
fn error_message(response: &ApiResponse) -> String {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&response.body) {
        return body.error;
    }
    let raw = response.body.trim();
    if raw.is_empty() { format!("HTTP {}", response.status) } else { raw.to_owned() }
}
