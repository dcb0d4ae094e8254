// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `dev`: Start the development server
//! - `whoami`: Print the current session's user
//! - `lang`: Show or persist the display language

/// Development server command.
pub mod dev;
/// Display language command.
pub mod lang;
/// Identity lookup command.
pub mod whoami;
