// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Development server components.
//!
//! # Components
//!
//! - `http`: router assembly and the Axum server
//! - `proxy`: API forwarding to the backend

/// HTTP server implementation using Axum.
pub mod http;
/// Reverse proxy for API requests.
pub mod proxy;
