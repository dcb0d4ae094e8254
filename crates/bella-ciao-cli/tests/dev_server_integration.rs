// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Integration tests for the development server.
//!
//! A throwaway backend echoes what it receives so the tests can check what
//! the proxy forwarded; static assets come from a temp directory.

use std::fs;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::tempdir;

use bella_ciao_cli::config::Config;
use bella_ciao_cli::server::http::build_router;

const APP_JS: &str = "console.log('bella ciao, bella ciao, bella ciao ciao ciao');\n";

async fn echo(request: Request) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let get = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body: Bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "host": get(header::HOST),
        "cookie": get(header::COOKIE),
        "content_type": get(header::CONTENT_TYPE),
        "body": String::from_utf8_lossy(&body),
    }))
}

/// Starts the echo backend and returns its base URL.
async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, Router::new().fallback(echo)).await.unwrap();
    });
    format!("http://{}", addr)
}

fn setup_static(dir: &Path) {
    fs::create_dir_all(dir.join("static")).unwrap();
    fs::write(dir.join("static/index.html"), "<!DOCTYPE html><title>bella-ciao</title>").unwrap();
    fs::write(dir.join("static/app.js"), APP_JS.repeat(4)).unwrap();
    fs::write(dir.join("static/tiny.css"), "a{}").unwrap();
}

fn config_for(target: &str) -> Config {
    let mut config = Config::default();
    config.proxy.target = target.to_string();
    config
}

#[tokio::test]
async fn test_api_requests_are_forwarded_without_prefix() {
    let backend = spawn_backend().await;
    let dir = tempdir().unwrap();
    setup_static(dir.path());
    let server = TestServer::new(build_router(&config_for(&backend), dir.path()).unwrap()).unwrap();

    let response = server
        .get("/api/users/whoami")
        .add_query_param("lang", "ca")
        .add_header(header::COOKIE, HeaderValue::from_static("session=abc"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let echoed: Value = response.json();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["path"], "/users/whoami");
    assert_eq!(echoed["query"], "lang=ca");
    assert_eq!(echoed["cookie"], "session=abc");
    assert_eq!(echoed["host"], backend.trim_start_matches("http://"));
}

#[tokio::test]
async fn test_post_bodies_are_forwarded() {
    let backend = spawn_backend().await;
    let dir = tempdir().unwrap();
    let server = TestServer::new(build_router(&config_for(&backend), dir.path()).unwrap()).unwrap();

    let response = server
        .post("/api/elections/vote")
        .json(&json!({ "candidates": [2, 1] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let echoed: Value = response.json();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["path"], "/elections/vote");
    assert_eq!(echoed["content_type"], "application/json");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({ "candidates": [2, 1] }));
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempdir().unwrap();
    let config = config_for(&format!("http://{}", addr));
    let server = TestServer::new(build_router(&config, dir.path()).unwrap()).unwrap();

    let response = server.get("/api/candidates/get").await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_static_assets_and_index_fallback() {
    let backend = spawn_backend().await;
    let dir = tempdir().unwrap();
    setup_static(dir.path());
    let server = TestServer::new(build_router(&config_for(&backend), dir.path()).unwrap()).unwrap();

    let asset = server.get("/app.js").await;
    assert_eq!(asset.status_code(), StatusCode::OK);
    assert_eq!(asset.text(), APP_JS.repeat(4));

    let page = server.get("/candidates").await;
    assert_eq!(page.status_code(), StatusCode::OK);
    assert!(page.text().contains("<title>bella-ciao</title>"));
}

#[tokio::test]
async fn test_responses_are_gzipped_when_accepted() {
    let backend = spawn_backend().await;
    let dir = tempdir().unwrap();
    setup_static(dir.path());
    let server = TestServer::new(build_router(&config_for(&backend), dir.path()).unwrap()).unwrap();

    let response = server
        .get("/app.js")
        .add_header(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );
}

#[tokio::test]
async fn test_small_responses_are_gzipped_too() {
    let backend = spawn_backend().await;
    let dir = tempdir().unwrap();
    setup_static(dir.path());
    let server = TestServer::new(build_router(&config_for(&backend), dir.path()).unwrap()).unwrap();

    let response = server
        .get("/tiny.css")
        .add_header(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_ENCODING).unwrap(),
        "gzip"
    );

    let plain = server.get("/tiny.css").await;
    assert!(plain.headers().get(header::CONTENT_ENCODING).is_none());
    assert_eq!(plain.text(), "a{}");
}
