// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Development server command.

use console::style;

use crate::config::Config;
use crate::server::http::create_server;

/// Runs the development server.
///
/// `host` and `port` override the `[dev]` section of the configuration.
pub async fn run(host: Option<String>, port: Option<u16>, quiet: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(host) = host {
        config.dev.host = host;
    }
    if let Some(port) = port {
        config.dev.port = port;
    }

    let addr = format!("{}:{}", config.dev.host, config.dev.port);
    if !quiet {
        println!(
            "{} {}",
            style("Server:").cyan(),
            style(format!("http://{}", addr)).green().bold()
        );
        println!(
            "{} {} {} {}",
            style("Proxy:").cyan(),
            style(format!("{}/*", config.proxy.prefix)).dim(),
            style("->").dim(),
            style(&config.proxy.target).dim()
        );
        println!(
            "{} {}",
            style("Static:").cyan(),
            style(&config.assets.static_dir).dim()
        );
        println!("{}", style("Press Ctrl+C to stop").dim());
        println!();
    }

    create_server(&addr, &config).await?;

    Ok(())
}
