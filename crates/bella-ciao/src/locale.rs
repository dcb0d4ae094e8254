// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Display language selection.
//!
//! The language is decided once, at startup, by [`resolve_locale`]:
//!
//! 1. the code persisted under [`LANG_STORAGE_KEY`], if it names a supported
//!    language;
//! 2. otherwise the platform-reported language (`LANG`, a browser's
//!    `navigator.language`, ...);
//! 3. otherwise English.
//!
//! Preferences live behind the [`PreferenceStore`] trait so the same lookup
//! works against a JSON file on disk or an in-memory map in tests.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// Storage key holding the user's chosen language code.
pub const LANG_STORAGE_KEY: &str = "bella-ciao.lang";

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
    /// Catalan.
    Ca,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Ca];

    /// The language code, as stored and as sent to the UI.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Ca => "ca",
        }
    }

    /// Parses a platform language tag such as `es-ES`, `ca_ES.UTF-8` or `en`.
    ///
    /// Only the primary subtag is considered.
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        Locale::ALL.into_iter().find(|l| l.code() == primary)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::from_language_tag(s)
            .ok_or_else(|| ClientError::Preferences(format!("unsupported language {:?}", s)))
    }
}

/// Persisted key/value preferences.
pub trait PreferenceStore: Send + Sync {
    /// Reads a value. Returns `None` if the key is not set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory preferences. Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| ClientError::Preferences(e.to_string()))?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| ClientError::Preferences(e.to_string()))?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in a file.
///
/// A missing file reads as empty; the file and its parent directory are
/// created on first write.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Uses the file at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::Preferences(format!(
                "could not read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.load()?;
        data.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::Preferences(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(&data)?;
        std::fs::write(&self.path, content).map_err(|e| {
            ClientError::Preferences(format!("could not write {}: {}", self.path.display(), e))
        })
    }
}

/// Picks the display language.
///
/// An unreadable store is treated like an empty one; the choice always
/// succeeds.
pub fn resolve_locale(store: &dyn PreferenceStore, platform_language: Option<&str>) -> Locale {
    let stored = match store.get(LANG_STORAGE_KEY) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "could not read language preference");
            None
        }
    };

    if let Some(locale) = stored.as_deref().and_then(Locale::from_language_tag) {
        tracing::debug!(%locale, "using stored language");
        return locale;
    }

    let locale = platform_language
        .and_then(Locale::from_language_tag)
        .unwrap_or_default();
    tracing::debug!(%locale, "using platform language");
    locale
}

/// Persists the chosen language for the next start.
pub fn persist_locale(store: &dyn PreferenceStore, locale: Locale) -> Result<()> {
    store.set(LANG_STORAGE_KEY, locale.code())
}
