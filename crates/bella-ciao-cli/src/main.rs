// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use bella_ciao_cli::commands;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bella-ciao")]
#[command(author = "Bella Ciao contributors")]
#[command(version)]
#[command(about = "Development server and API tools for the bella-ciao election client", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the development server (API proxy + static assets)
    Dev {
        /// Port to run the dev server on (overrides bella-ciao.toml)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (overrides bella-ciao.toml)
        #[arg(long)]
        host: Option<String>,
    },
    /// Print the user the backend associates with a session
    Whoami {
        /// API base URL (overrides bella-ciao.toml)
        #[arg(long)]
        api: Option<String>,
        /// Raw Cookie header carrying the session
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Show the display language, or persist a new one (en, es, ca)
    Lang {
        /// Language code to persist
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command {
        Commands::Dev { port, host } => commands::dev::run(host, port, cli.quiet).await,
        Commands::Whoami { api, cookie } => commands::whoami::run(api, cookie).await,
        Commands::Lang { code } => commands::lang::run(code).await,
    }
}
