//! HTTP middleware for the Shipyard service.
//!
//! This module provides:
//! - [`RequestId`]: Correlation id, usable directly as a handler extractor
//! - [`extract_or_generate_request_id`]: Read `X-Request-ID` or generate a UUID v7
//! - [`MetricsLayer`]: Tower middleware for request ids, spans and HTTP metrics
//!
//! # Request ID Propagation
//!
//! `MetricsLayer` resolves the request id once, stores it in the request
//! extensions for handlers, and echoes it back in the `X-Request-ID` response
//! header.
//!
//! # Metrics Recording
//!
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path
//! - `http_request_size_bytes`: Histogram by method, path
//! - `http_response_size_bytes`: Histogram by method, path
//!
//! Numeric path segments are collapsed to `{id}` so every ship does not get
//! its own label set.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new UUID v7 (time-sortable) request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Handlers take `RequestId` as an argument.
///
/// Uses the id stored by [`MetricsLayer`] when the layer is installed, so the
/// handler, the request span and the response header all agree.
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| extract_or_generate_request_id(&parts.headers)))
    }
}

/// Extract the request ID from headers or generate a new UUID v7.
///
/// Looks for the `X-Request-ID` header (case-insensitive). If not present,
/// empty or invalid UTF-8, generates a new UUID v7.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Normalize a request path for metric labels.
///
/// Strips the query string and replaces all-digit segments with `{id}`, so
/// `/rest/ships/42?x=1` becomes `/rest/ships/{id}`.
pub fn normalize_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or(path);
    path.split('/')
        .map(|segment| {
            let digits = segment.strip_prefix('-').unwrap_or(segment);
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Groups status codes into "2xx", "3xx", "4xx", "5xx".
fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

// =============================================================================
// MetricsLayer - Tower middleware for HTTP metrics
// =============================================================================

/// Tower layer for request ids, request spans and HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

/// Middleware service that records HTTP metrics.
#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();

        let method = req.method().to_string();
        let path = normalize_path(req.uri().path());

        if let Some(size) = content_length(req.headers()) {
            metrics::histogram!(
                "http_request_size_bytes",
                "method" => method.clone(),
                "path" => path.clone()
            )
            .record(size);
        }

        let request_id = extract_or_generate_request_id(req.headers());
        req.extensions_mut().insert(request_id.clone());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        {
            let _enter = span.enter();
            tracing::debug!(uri = %req.uri(), "handling request");
        }

        let future = self.inner.call(req);

        MetricsFuture {
            inner: future,
            start,
            method,
            path,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that records metrics and tags the response on completion.
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let duration_secs = this.start.elapsed().as_secs_f64();
        let latency_ms = duration_secs * 1000.0;

        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => this.path.clone()
        )
        .record(duration_secs);

        match &mut result {
            Ok(response) => {
                let status = response.status().as_u16();

                metrics::counter!(
                    "http_requests_total",
                    "method" => this.method.clone(),
                    "path" => this.path.clone(),
                    "status" => status_bucket(status)
                )
                .increment(1);

                if let Some(size) = content_length(response.headers()) {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => this.method.clone(),
                        "path" => this.path.clone()
                    )
                    .record(size);
                }

                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                if status >= 500 {
                    tracing::warn!(status, latency_ms, "request completed");
                } else {
                    tracing::info!(status, latency_ms, "request completed");
                }
            }
            Err(_) => {
                metrics::counter!(
                    "http_requests_total",
                    "method" => this.method.clone(),
                    "path" => this.path.clone(),
                    "status" => "5xx"
                )
                .increment(1);

                tracing::error!(latency_ms, "request failed");
            }
        }

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
        assert!(id1.as_str().contains('-'));
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("dock-7"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "dock-7");
    }

    #[test]
    fn test_extract_request_id_generates_when_missing_or_blank() {
        assert_eq!(
            extract_or_generate_request_id(&HeaderMap::new()).as_str().len(),
            36
        );

        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  "));
        assert_eq!(extract_or_generate_request_id(&headers).as_str().len(), 36);
    }

    #[test]
    fn test_normalize_path_collapses_ids() {
        assert_eq!(normalize_path("/rest/ships"), "/rest/ships");
        assert_eq!(normalize_path("/rest/ships/42"), "/rest/ships/{id}");
        assert_eq!(normalize_path("/rest/ships/-3"), "/rest/ships/{id}");
        assert_eq!(normalize_path("/rest/ships/count"), "/rest/ships/count");
        assert_eq!(
            normalize_path("/rest/ships?pageSize=5&order=SPEED"),
            "/rest/ships"
        );
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_normalize_path_keeps_non_numeric_segments() {
        assert_eq!(normalize_path("/rest/ships/abc"), "/rest/ships/abc");
        assert_eq!(normalize_path("/rest/ships/-"), "/rest/ships/-");
        assert_eq!(normalize_path("/rest/ships/1.5"), "/rest/ships/1.5");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(301), "3xx");
        assert_eq!(status_bucket(404), "4xx");
        assert_eq!(status_bucket(400), "4xx");
        assert_eq!(status_bucket(503), "5xx");
        assert_eq!(status_bucket(99), "other");
    }

    #[tokio::test]
    async fn test_request_id_extractor_prefers_extension() {
        let mut req = Request::builder()
            .header(REQUEST_ID_HEADER, "from-header")
            .body(())
            .unwrap();
        req.extensions_mut().insert(RequestId::new("from-layer"));
        let (mut parts, _) = req.into_parts();

        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.as_str(), "from-layer");
    }

    #[tokio::test]
    async fn test_request_id_extractor_falls_back_to_header() {
        let (mut parts, _) = Request::builder()
            .header(REQUEST_ID_HEADER, "from-header")
            .body(())
            .unwrap()
            .into_parts();

        let id = RequestId::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(id.as_str(), "from-header");
    }
}
