// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Forwarding of API requests to the backend.
//!
//! Requests under the proxy prefix are sent to the backend with the prefix
//! stripped: `/api/users/whoami?x=1` becomes `<target>/users/whoami?x=1`.
//! The `Host` header is rewritten to the backend's and hop-by-hop headers
//! are dropped in both directions.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::Url;

/// Maximum request body forwarded to the backend (32MB, enough for uploads).
const MAX_BODY_SIZE: usize = 32 * 1024 * 1024;

static HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::HOST,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Backend location and the HTTP client used to reach it.
#[derive(Debug, Clone)]
pub struct Proxy {
    client: reqwest::Client,
    target: Url,
    prefix: String,
}

impl Proxy {
    /// Creates a proxy forwarding `prefix` to `target`.
    pub fn new(target: &str, prefix: &str) -> Result<Self, ProxyError> {
        let target =
            Url::parse(target).map_err(|e| ProxyError::InvalidTarget(format!("{}: {}", target, e)))?;
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(ProxyError::Upstream)?;

        Ok(Self {
            client,
            target,
            prefix: normalize_prefix(prefix),
        })
    }

    /// The forwarded path prefix, e.g. `/api`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Builds the backend URL for a request path and query.
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> Url {
        let mut url = self.target.clone();
        let base = self.target.path().trim_end_matches('/');
        url.set_path(&format!("{}{}", base, rewrite_path(path, &self.prefix)));
        url.set_query(query);
        url
    }

    /// Sends `request` to the backend and relays the answer.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let (parts, body) = request.into_parts();
        let url = self.upstream_url(parts.uri.path(), parts.uri.query());
        tracing::debug!(method = %parts.method, from = %parts.uri, to = %url, "proxying");

        let body = axum::body::to_bytes(body, MAX_BODY_SIZE)
            .await
            .map_err(|_| ProxyError::TooLarge)?;

        let upstream = self
            .client
            .request(parts.method, url)
            .headers(strip_hop_by_hop(parts.headers))
            .body(body)
            .send()
            .await
            .map_err(ProxyError::Upstream)?;

        let status = upstream.status();
        let headers = strip_hop_by_hop(upstream.headers().clone());
        let bytes = upstream.bytes().await.map_err(ProxyError::Upstream)?;

        Ok((status, headers, bytes).into_response())
    }
}

/// Axum handler for everything under the proxy prefix.
pub async fn proxy_handler(State(proxy): State<Arc<Proxy>>, request: Request<Body>) -> Response {
    match proxy.forward(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, "proxy request failed");
            e.into_response()
        }
    }
}

/// Strips `prefix` from `path`; the result always starts with `/`.
pub fn rewrite_path(path: &str, prefix: &str) -> String {
    let rest = path.strip_prefix(prefix).unwrap_or(path);
    if rest.is_empty() {
        "/".to_string()
    } else if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn strip_hop_by_hop(mut headers: HeaderMap) -> HeaderMap {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove(header::CONTENT_LENGTH);
    headers
}

/// Error types for proxying.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Request body exceeds the maximum allowed size.
    #[error("Request body too large (max {MAX_BODY_SIZE} bytes)")]
    TooLarge,

    /// The configured backend URL is not usable.
    #[error("Invalid proxy target: {0}")]
    InvalidTarget(String),

    /// The backend could not be reached or its answer could not be read.
    #[error("Backend request failed: {0}")]
    Upstream(#[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match self {
            ProxyError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::InvalidTarget(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_path() {
        assert_eq!(rewrite_path("/api/users/whoami", "/api"), "/users/whoami");
        assert_eq!(rewrite_path("/api", "/api"), "/");
        assert_eq!(rewrite_path("/api/", "/api"), "/");
        assert_eq!(rewrite_path("/static/app.js", "/api"), "/static/app.js");
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("api/"), "/api");
    }

    #[test]
    fn test_upstream_url_keeps_query_and_target_path() {
        let proxy = Proxy::new("http://localhost:9876", "/api").unwrap();
        assert_eq!(
            proxy
                .upstream_url("/api/elections/vote/check", Some("hash=abc"))
                .as_str(),
            "http://localhost:9876/elections/vote/check?hash=abc"
        );

        let nested = Proxy::new("http://backend/v1/", "/api").unwrap();
        assert_eq!(
            nested.upstream_url("/api/candidates/get", None).as_str(),
            "http://backend/v1/candidates/get"
        );
    }

    #[test]
    fn test_invalid_target() {
        assert!(matches!(
            Proxy::new("localhost without scheme", "/api"),
            Err(ProxyError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_hop_by_hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "localhost:3000".parse().unwrap());
        headers.insert(header::CONNECTION, "keep-alive".parse().unwrap());
        headers.insert(header::COOKIE, "session=abc".parse().unwrap());
        let headers = strip_hop_by_hop(headers);
        assert!(headers.get(header::HOST).is_none());
        assert!(headers.get(header::CONNECTION).is_none());
        assert_eq!(headers.get(header::COOKIE).unwrap(), "session=abc");
    }
}
