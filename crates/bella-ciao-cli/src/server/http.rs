// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP server for development.
//!
//! API requests go to the backend through [`Proxy`]; everything else is a
//! static asset, with the index page answering for client-side routes.

use std::path::Path;
use std::sync::Arc;

use axum::{routing::any, Router};
use tower_http::compression::predicate::{NotForContentType, Predicate, SizeAbove};
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::proxy::{proxy_handler, Proxy};
use crate::config::Config;

/// Builds the development application.
///
/// Relative asset paths are resolved against `root`.
pub fn build_router(config: &Config, root: &Path) -> anyhow::Result<Router> {
    let proxy = Arc::new(Proxy::new(&config.proxy.target, &config.proxy.prefix)?);
    let prefix = proxy.prefix().to_string();

    let static_dir = root.join(&config.assets.static_dir);
    let index = static_dir.join(&config.assets.index);
    if !static_dir.exists() {
        tracing::warn!(dir = %static_dir.display(), "static directory not found");
    }
    let assets = ServeDir::new(&static_dir).fallback(ServeFile::new(&index));

    let app = Router::new()
        .route(&prefix, any(proxy_handler))
        .route(&format!("{}/*path", prefix), any(proxy_handler))
        .with_state(proxy)
        .fallback_service(assets)
        .layer(CompressionLayer::new().compress_when(compressible()))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Compress every response whatever its size, except media types that are
/// already compressed or must stream.
fn compressible() -> impl Predicate {
    SizeAbove::new(0)
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE)
}

/// Creates and starts the development HTTP server.
pub async fn create_server(addr: &str, config: &Config) -> anyhow::Result<()> {
    let working_dir = std::env::current_dir()?;
    let app = build_router(config, &working_dir)?;

    tracing::info!(
        %addr,
        target = %config.proxy.target,
        prefix = %config.proxy.prefix,
        "development server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
