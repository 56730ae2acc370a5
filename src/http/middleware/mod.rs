//! Middleware chain wrapped around every route.
//!
//! # Nesting (outermost first)
//! ```text
//! RequestIdLayer          assign ID, open request span
//!   CatchPanicLayer       panic → 500, server keeps running
//!     proxy_headers       real client address / scheme / host
//!       logging           entry + exit logs with timing
//!         Server header   bravia-remote/<version>
//!           Compression   gzip / deflate per Accept-Encoding
//!             routes
//! ```

pub mod logging;
pub mod proxy_headers;

use std::sync::Arc;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer};

use crate::http::request::{RequestCounter, RequestIdLayer};
use crate::http::response::{panic_response, server_header_layer};

pub use logging::log_requests;
pub use proxy_headers::{normalize_proxy_headers, ClientInfo};

/// Wrap `router` in the full middleware chain, drawing IDs from `counter`.
pub fn apply(router: Router, counter: Arc<RequestCounter>) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(RequestIdLayer::new(counter))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn(normalize_proxy_headers))
            .layer(from_fn(log_requests))
            .layer(server_header_layer())
            .layer(CompressionLayer::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::Extension,
        http::{header, Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    use crate::http::request::RequestId;
    use crate::http::response::SERVER_NAME;

    fn test_router(counter: Arc<RequestCounter>) -> Router {
        let routes = Router::new()
            .route("/id", get(|Extension(id): Extension<RequestId>| async move { id.to_string() }))
            .route("/panic", get(explode))
            .route(
                "/client",
                get(|Extension(info): Extension<ClientInfo>| async move { info.remote_addr }),
            )
            .route(
                "/scheme",
                get(|Extension(info): Extension<ClientInfo>| async move { info.scheme }),
            )
            .route("/big", get(|| async { "remote ".repeat(200) }));
        apply(routes, counter)
    }

    async fn explode() -> &'static str {
        panic!("handler blew up")
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_panic_becomes_500_and_server_survives() {
        let app = test_router(Arc::new(RequestCounter::new()));

        let response = app.clone().oneshot(get_req("/panic")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "Internal Server Error");

        let response = app.oneshot(get_req("/id")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "2");
    }

    #[tokio::test]
    async fn test_concurrent_requests_get_distinct_sequential_ids() {
        let counter = Arc::new(RequestCounter::new());
        let app = test_router(counter.clone());

        let tasks: Vec<_> = (0..50)
            .map(|_| {
                let app = app.clone();
                tokio::spawn(async move {
                    let response = app.oneshot(get_req("/id")).await.unwrap();
                    body_string(response).await.parse::<u64>().unwrap()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in futures_util::future::join_all(tasks).await {
            ids.push(task.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=50).collect::<Vec<u64>>());
        assert_eq!(counter.issued(), 50);
    }

    #[tokio::test]
    async fn test_server_header_on_every_response() {
        let app = test_router(Arc::new(RequestCounter::new()));

        for uri in ["/id", "/missing", "/panic"] {
            let response = app.clone().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.headers()[header::SERVER], SERVER_NAME);
        }
    }

    #[tokio::test]
    async fn test_proxy_headers_reach_handlers() {
        let app = test_router(Arc::new(RequestCounter::new()));
        let req = Request::builder()
            .uri("/client")
            .header("X-Forwarded-For", "203.0.113.7")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(body_string(response).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_forwarded_scheme_reaches_handlers() {
        let app = test_router(Arc::new(RequestCounter::new()));
        let req = Request::builder()
            .uri("/scheme")
            .header("X-Forwarded-Proto", "https")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(body_string(response).await, "https");

        let response = app.oneshot(get_req("/scheme")).await.unwrap();
        assert_eq!(body_string(response).await, "http");
    }

    #[tokio::test]
    async fn test_compression_keeps_status() {
        let app = test_router(Arc::new(RequestCounter::new()));
        let req = Request::builder()
            .uri("/big")
            .header(header::ACCEPT_ENCODING, "gzip")
            .body(Body::empty())
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_ENCODING], "gzip");

        let response = app.oneshot(get_req("/big")).await.unwrap();
        assert!(response.headers().get(header::CONTENT_ENCODING).is_none());
    }
}
