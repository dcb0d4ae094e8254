// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! bella-ciao project configuration.
//!
//! Configuration is loaded from `bella-ciao.toml` at the project root.
//! Every section and field is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! [dev]
//! port = 3000
//! host = "127.0.0.1"
//!
//! [proxy]
//! target = "http://localhost:9876"
//! prefix = "/api"
//!
//! [assets]
//! static_dir = "static"
//! index = "index.html"
//!
//! [client]
//! api_base = "http://127.0.0.1:3000"
//! preferences = ".bella-ciao/preferences.json"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "bella-ciao.toml";

/// Main configuration structure loaded from `bella-ciao.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Development server settings.
    #[serde(default)]
    pub dev: DevConfig,
    /// Backend proxy settings.
    #[serde(default)]
    pub proxy: ProxyConfig,
    /// Static asset settings.
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Settings for CLI commands that call the API.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Development server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DevConfig {
    /// Server port (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Server host (default: "127.0.0.1").
    #[serde(default = "default_host")]
    pub host: String,
}

/// Where API requests are forwarded.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    /// Backend base URL (default: "http://localhost:9876").
    #[serde(default = "default_target")]
    pub target: String,
    /// Path prefix that is forwarded and stripped (default: "/api").
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Directory served at the root (default: "static").
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// File served for paths that match no asset (default: "index.html").
    #[serde(default = "default_index")]
    pub index: String,
}

/// Configuration for commands acting as an API client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL requests are resolved against (default: "http://127.0.0.1:3000").
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// JSON file holding persisted preferences (default: ".bella-ciao/preferences.json").
    #[serde(default = "default_preferences")]
    pub preferences: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_target() -> String {
    "http://localhost:9876".to_string()
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_index() -> String {
    "index.html".to_string()
}

fn default_api_base() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_preferences() -> String {
    ".bella-ciao/preferences.json".to_string()
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            prefix: default_prefix(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            index: default_index(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            preferences: default_preferences(),
        }
    }
}

impl Config {
    /// Loads configuration from `bella-ciao.toml` in the current directory.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads configuration from an explicit path, with the same fallback.
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.dev.port, 3000);
        assert_eq!(config.proxy.target, "http://localhost:9876");
        assert_eq!(config.proxy.prefix, "/api");
        assert_eq!(config.assets.static_dir, "static");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[proxy]\ntarget = \"http://backend:8080\"\n\n[dev]\nport = 4000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.proxy.target, "http://backend:8080");
        assert_eq!(config.proxy.prefix, "/api");
        assert_eq!(config.dev.port, 4000);
        assert_eq!(config.dev.host, "127.0.0.1");
        assert_eq!(config.client.preferences, ".bella-ciao/preferences.json");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[dev]\nport = \"not a number\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
