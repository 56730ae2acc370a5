//! Reverse-proxy header normalization.
//!
//! Resolves the originating client address and scheme from forwarding headers
//! so logs show the real caller when the remote sits behind a proxy.
//!
//! Precedence:
//! - address: `X-Forwarded-For` (first hop), `X-Real-IP`, `Forwarded: for=`,
//!   then the TCP peer
//! - scheme: `X-Forwarded-Proto`, `X-Forwarded-Scheme`, `Forwarded: proto=`,
//!   then `http`
//! - `X-Forwarded-Host` replaces `Host`

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_SCHEME: &str = "x-forwarded-scheme";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Where a request really came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub remote_addr: String,
    pub scheme: String,
}

/// Middleware: attach [`ClientInfo`] and apply `X-Forwarded-Host`.
pub async fn normalize_proxy_headers(mut req: Request, next: Next) -> Response {
    let info = client_info(&req);

    if let Some(host) = req.headers().get(X_FORWARDED_HOST).cloned() {
        req.headers_mut().insert(header::HOST, host);
    }
    req.extensions_mut().insert(info);

    next.run(req).await
}

/// Resolve the client address and scheme of a request.
pub fn client_info<B>(req: &axum::http::Request<B>) -> ClientInfo {
    let headers = req.headers();

    let remote_addr = forwarded_addr(headers)
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.to_string())
        })
        .unwrap_or_else(|| "unknown".to_string());

    let scheme = forwarded_scheme(headers)
        .or_else(|| req.uri().scheme_str().map(str::to_ascii_lowercase))
        .unwrap_or_else(|| "http".to_string());

    ClientInfo { remote_addr, scheme }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn forwarded_addr(headers: &HeaderMap) -> Option<String> {
    if let Some(chain) = header_str(headers, X_FORWARDED_FOR) {
        let first = chain.split(',').next().unwrap_or(chain).trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    if let Some(ip) = header_str(headers, X_REAL_IP) {
        return Some(ip.to_string());
    }

    header_str(headers, header::FORWARDED.as_str()).and_then(|v| forwarded_param(v, "for"))
}

fn forwarded_scheme(headers: &HeaderMap) -> Option<String> {
    header_str(headers, X_FORWARDED_PROTO)
        .or_else(|| header_str(headers, X_FORWARDED_SCHEME))
        .map(str::to_ascii_lowercase)
        .or_else(|| {
            header_str(headers, header::FORWARDED.as_str())
                .and_then(|v| forwarded_param(v, "proto"))
                .map(|proto| proto.to_ascii_lowercase())
                .filter(|proto| proto == "http" || proto == "https")
        })
}

/// First `key=value` pair of an RFC 7239 `Forwarded` header, unquoted.
fn forwarded_param(value: &str, key: &str) -> Option<String> {
    value
        .split([',', ';'])
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri("/irccip/key");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_peer_address_without_headers() {
        let mut req = request(&[]);
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 9], 51000))));
        let info = client_info(&req);
        assert_eq!(info.remote_addr, "10.0.0.9:51000");
        assert_eq!(info.scheme, "http");
    }

    #[test]
    fn test_unknown_peer() {
        assert_eq!(client_info(&request(&[])).remote_addr, "unknown");
    }

    #[test]
    fn test_x_forwarded_for_takes_first_hop() {
        let req = request(&[
            ("X-Forwarded-For", "203.0.113.7, 10.0.0.1"),
            ("X-Real-IP", "198.51.100.2"),
        ]);
        assert_eq!(client_info(&req).remote_addr, "203.0.113.7");
    }

    #[test]
    fn test_real_ip_then_forwarded() {
        let req = request(&[("X-Real-IP", "198.51.100.2")]);
        assert_eq!(client_info(&req).remote_addr, "198.51.100.2");

        let req = request(&[("Forwarded", "for=\"192.0.2.60\";proto=HTTPS;by=203.0.113.43")]);
        let info = client_info(&req);
        assert_eq!(info.remote_addr, "192.0.2.60");
        assert_eq!(info.scheme, "https");
    }

    #[test]
    fn test_scheme_precedence() {
        let req = request(&[
            ("X-Forwarded-Proto", "HTTPS"),
            ("X-Forwarded-Scheme", "http"),
        ]);
        assert_eq!(client_info(&req).scheme, "https");

        let req = request(&[("X-Forwarded-Scheme", "https")]);
        assert_eq!(client_info(&req).scheme, "https");

        let req = request(&[("Forwarded", "proto=gopher")]);
        assert_eq!(client_info(&req).scheme, "http");
    }
}
