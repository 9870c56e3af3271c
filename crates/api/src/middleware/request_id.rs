use std::task::{Context, Poll};

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Request, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

// =============================================================================
// RequestId
// =============================================================================

/// Correlates one request's log lines and its response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// RequestIdLayer
// =============================================================================

/// Propagates an inbound `x-request-id` or generates one, and reflects
/// it on the response.
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl RequestIdLayer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<Inner> Layer<Inner> for RequestIdLayer {
    type Service = RequestIdService<Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        RequestIdService { inner }
    }
}

// =============================================================================
// RequestIdService
// =============================================================================

#[derive(Debug, Clone)]
pub struct RequestIdService<Inner> {
    inner: Inner,
}

impl<Inner, RequestBody, ResponseBody> Service<Request<RequestBody>> for RequestIdService<Inner>
where
    Inner: Service<Request<RequestBody>, Response = Response<ResponseBody>>
        + Clone
        + Send
        + 'static,
    Inner::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = Inner::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, mut request: Request<RequestBody>) -> Self::Future {
        let request_id = request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(RequestId::new)
            .unwrap_or_else(RequestId::generate);

        request.extensions_mut().insert(request_id.clone());

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;

            if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
                response
                    .headers_mut()
                    .insert(REQUEST_ID_HEADER.clone(), header_value);
            }

            Ok(response)
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
