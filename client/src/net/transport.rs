//! Browser HTTP transport.
//!
//! Client-side (hydrate): `fetch` via `gloo-net`, raced against a
//! `gloo-timers` timeout.
//! Server-side (SSR): every call fails with [`TransportError::Unavailable`]
//! since these requests only make sense in the browser.

#![allow(clippy::unused_async)]

use super::client::{ApiRequest, ApiResponse, Transport, TransportError};
#[cfg(feature = "hydrate")]
use super::client::Method;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

#[cfg(feature = "hydrate")]
fn gloo_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[cfg(feature = "hydrate")]
async fn fetch(request: ApiRequest) -> Result<ApiResponse, TransportError> {
    let mut builder = gloo_net::http::RequestBuilder::new(&request.url).method(gloo_method(request.method));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::Network(e.to_string()))?;

    let resp = prepared.send().await.map_err(|e| TransportError::Network(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
    Ok(ApiResponse { status, body })
}

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let timeout = request.timeout;
            let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
            let call = std::pin::pin!(fetch(request));
            let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(millis));
            match select(call, timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportError::Timeout(timeout)),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = request;
            Err(TransportError::Unavailable)
        }
    }
}
