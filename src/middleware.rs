//! Request ID middleware for correlating logs with requests.
//!
//! Generates a UUID v4 for each incoming request and creates a tracing span
//! that wraps the entire request lifecycle. All logs emitted during request
//! processing will include the request_id field for correlation.
//!
//! The response body is watched after the handler returns. Once the status
//! line is on the wire nothing can be corrected, so a body that errors or is
//! dropped before its last frame is logged at error level inside the request
//! span.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use http_body::{Body as HttpBody, Frame, SizeHint};
use tracing::{Instrument, Span};
use uuid::Uuid;

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost layer so the span wraps all request processing.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    // HEAD responses have their body discarded by the router
    let watch_body = request.method() != Method::HEAD;

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if watch_body {
            let span = Span::current();
            response.map(|body| Body::new(WatchedBody::new(body, span)))
        } else {
            response
        }
    }
    .instrument(span)
    .await
}

/// Response body that reports write failures in the span of its request.
pub struct WatchedBody {
    inner: Body,
    span: Span,
    finished: bool,
}

impl WatchedBody {
    pub fn new(inner: Body, span: Span) -> Self {
        let finished = inner.is_end_stream();
        Self {
            inner,
            span,
            finished,
        }
    }
}

impl HttpBody for WatchedBody {
    type Data = Bytes;
    type Error = axum::Error;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = &mut *self;
        let polled = Pin::new(&mut this.inner).poll_frame(cx);

        match &polled {
            Poll::Ready(None) => this.finished = true,
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                this.span.in_scope(|| {
                    tracing::error!(error = %e, "Response body failed after headers were sent");
                });
            }
            Poll::Ready(Some(Ok(_))) => {
                if this.inner.is_end_stream() {
                    this.finished = true;
                }
            }
            Poll::Pending => {}
        }

        polled
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for WatchedBody {
    fn drop(&mut self) {
        if !self.finished {
            self.span.in_scope(|| {
                tracing::error!("Response body dropped before it was fully written");
            });
        }
    }
}
