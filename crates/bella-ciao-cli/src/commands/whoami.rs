// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Prints the identity the backend associates with the current session.

use bella_ciao::{ApiClient, ClientError, Session, User};
use console::style;

use crate::config::Config;

/// Fetches `/api/users/whoami` and prints the user as JSON.
///
/// `api_base` overrides `[client].api_base`. A rejected session is reported,
/// not treated as a failure of the command.
pub async fn run(api_base: Option<String>, cookie: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api_base = api_base.unwrap_or(config.client.api_base);

    match fetch(&api_base, cookie.as_deref()).await? {
        Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        None => println!("{}", style("Not logged in").yellow().bold()),
    }
    Ok(())
}

/// The current user, or `None` when the backend rejects the session.
///
/// `cookie` is sent verbatim as the `Cookie` header.
pub async fn fetch(api_base: &str, cookie: Option<&str>) -> anyhow::Result<Option<User>> {
    let mut builder = reqwest::Client::builder();
    if let Some(cookie) = cookie {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(reqwest::header::COOKIE, cookie.parse()?);
        builder = builder.default_headers(headers);
    }
    let client = ApiClient::with_http_client(api_base, builder.build()?)?;
    let session = Session::new();

    match client.whoami(&session).await {
        Ok(user) => Ok(Some(user)),
        Err(ClientError::NotLoggedIn) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn whoami(headers: HeaderMap) -> axum::response::Response {
        let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
        if cookie != Some("session=abc") {
            return StatusCode::UNAUTHORIZED.into_response();
        }
        Json(json!({
            "id": 1,
            "name": "Admin",
            "unique_id": "00000000T",
            "role": "admin",
            "files": null,
            "messages": null
        }))
        .into_response()
    }

    async fn spawn_backend() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/api/users/whoami", get(whoami));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_rejected_session_is_not_an_error() {
        let base = spawn_backend().await;
        assert!(fetch(&base, None).await.unwrap().is_none());
        assert!(fetch(&base, Some("session=stale")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cookie_is_forwarded() {
        let base = spawn_backend().await;
        let user = fetch(&base, Some("session=abc")).await.unwrap().unwrap();
        assert_eq!(user.name, "Admin");
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        assert!(fetch(&format!("http://{}", addr), None).await.is_err());
    }

    #[tokio::test]
    async fn test_bad_cookie_value_fails() {
        assert!(fetch("http://127.0.0.1:1", Some("bad\ncookie")).await.is_err());
    }
}
