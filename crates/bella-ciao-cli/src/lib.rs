// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! bella-ciao CLI library.
//!
//! Command-line tooling around the bella-ciao client: a development server
//! that proxies API calls to the backend and serves the built UI, plus small
//! commands that talk to the API directly.
//!
//! # Usage
//!
//! ```bash
//! bella-ciao dev        # Start development server
//! bella-ciao whoami     # Print the current session's user
//! bella-ciao lang es    # Persist the display language
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `bella-ciao.toml` at the project root.

/// CLI commands (dev, whoami, lang).
pub mod commands;
/// Project configuration from `bella-ciao.toml`.
pub mod config;
/// Development server.
pub mod server;
