//! Request identification.
//!
//! # Responsibilities
//! - Assign a sequential ID to every inbound request
//! - Make the ID available to handlers (request extensions)
//! - Run all downstream work inside a `request{id=N}` span for log correlation
//!
//! # Design Decisions
//! - Request ID added before any other middleware runs
//! - IDs come from a counter injected at construction, starting at 1
//! - The ID is never echoed back to the caller

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};
use tracing::instrument::Instrumented;
use tracing::Instrument;

/// Sequential identifier of one inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide source of request IDs.
#[derive(Debug, Default)]
pub struct RequestCounter {
    last: AtomicU64,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next ID. The first call returns 1.
    pub fn next_id(&self) -> RequestId {
        RequestId(self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }

    /// Number of IDs handed out so far.
    pub fn issued(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}

/// Read the request ID attached by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<RequestId>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<RequestId> {
        self.extensions().get::<RequestId>().copied()
    }
}

/// Layer that tags each request with the next ID from a shared counter.
#[derive(Debug, Clone)]
pub struct RequestIdLayer {
    counter: Arc<RequestCounter>,
}

impl RequestIdLayer {
    pub fn new(counter: Arc<RequestCounter>) -> Self {
        Self { counter }
    }
}

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService {
            inner,
            counter: self.counter.clone(),
        }
    }
}

/// Service produced by [`RequestIdLayer`].
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
    counter: Arc<RequestCounter>,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Instrumented<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        let id = self.counter.next_id();
        req.extensions_mut().insert(id);

        let span = tracing::info_span!("request", id = id.0);
        let future = span.in_scope(|| self.inner.call(req));
        future.instrument(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    #[test]
    fn test_counter_starts_at_one() {
        let counter = RequestCounter::new();
        assert_eq!(counter.next_id(), RequestId(1));
        assert_eq!(counter.next_id(), RequestId(2));
        assert_eq!(counter.issued(), 2);
    }

    #[test]
    fn test_counter_is_unique_across_threads() {
        let counter = Arc::new(RequestCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || (0..1000).map(|_| counter.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 8000);
        assert_eq!(seen.iter().max(), Some(&RequestId(8000)));
    }

    #[tokio::test]
    async fn test_layer_attaches_id() {
        let counter = Arc::new(RequestCounter::new());
        let service = RequestIdLayer::new(counter.clone()).layer(service_fn(
            |req: Request<()>| async move { Ok::<_, Infallible>(req.request_id()) },
        ));

        let first = service.clone().oneshot(Request::new(())).await.unwrap();
        let second = service.oneshot(Request::new(())).await.unwrap();

        assert_eq!(first, Some(RequestId(1)));
        assert_eq!(second, Some(RequestId(2)));
        assert_eq!(counter.issued(), 2);
    }
}
