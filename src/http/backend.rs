use std::sync::Arc;
use std::time::Duration;

use crate::http::{error::HttpError, request::HttpRequest, response::HttpResponse};
use async_trait::async_trait;
use tracing::trace;

/// The transport capability
///
/// Implementations perform one request and report failure through
/// `HttpError`. The pipeline never calls a global client, so tests swap in
/// a mock and production code uses [`ReqwestBackend`].
///
/// # Examples
///
/// ```
/// use rest_either::http::{HttpBackend, HttpRequest, HttpResponse, HttpError};
/// use async_trait::async_trait;
///
/// struct Offline;
///
/// #[async_trait]
/// impl HttpBackend for Offline {
///     async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
///         Err(HttpError::Network(format!("offline, cannot reach {}", req.url)))
///     }
/// }
/// ```
#[async_trait]
pub trait HttpBackend {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError>;
}

#[async_trait]
impl<B: HttpBackend + Send + Sync + ?Sized> HttpBackend for Arc<B> {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
        self.as_ref().send(req).await
    }
}

/// Production backend built on a single reused `reqwest::Client`
#[derive(Clone, Debug)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestBackend {
    pub fn new() -> Result<Self, HttpError> {
        Self::build(None)
    }

    /// Backend whose requests fail with `HttpError::Timeout` after `limit`
    pub fn with_timeout(limit: Duration) -> Result<Self, HttpError> {
        Self::build(Some(limit))
    }

    fn build(timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        let client = builder
            .build()
            .map_err(|e| HttpError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut request_builder = self
            .client
            .request(req.method.clone(), &req.url)
            .headers(req.headers.clone());
        if let Some(ref body) = req.body {
            request_builder = request_builder.body(body.clone());
        }
        let resp = request_builder.send().await.map_err(|e| self.map_error(e))?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await.map_err(|e| self.map_error(e))?;
        trace!(status, bytes = body.len(), "response body read");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl ReqwestBackend {
    fn map_error(&self, err: reqwest::Error) -> HttpError {
        match self.timeout {
            Some(limit) if err.is_timeout() => HttpError::Timeout(limit.as_millis()),
            _ if err.is_decode() || err.is_body() => HttpError::Parse(err.to_string()),
            _ => HttpError::Network(err.to_string()),
        }
    }
}

/// Bounds the time any backend may take to answer
///
/// With no limit the inner backend is called as is.
pub struct Timeout<B> {
    inner: B,
    limit: Option<Duration>,
}

impl<B> Timeout<B> {
    pub fn new(inner: B, limit: impl Into<Option<Duration>>) -> Self {
        Self {
            inner,
            limit: limit.into(),
        }
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> HttpBackend for Timeout<B> {
    async fn send(&self, req: &HttpRequest) -> Result<HttpResponse, HttpError> {
        match self.limit {
            Some(limit) => tokio::time::timeout(limit, self.inner.send(req))
                .await
                .map_err(|_| HttpError::Timeout(limit.as_millis()))?,
            None => self.inner.send(req).await,
        }
    }
}
