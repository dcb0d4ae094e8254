// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Shows or changes the persisted display language.

use std::path::Path;

use bella_ciao::locale::{persist_locale, resolve_locale, FilePreferences, Locale};
use console::style;

use crate::config::Config;

/// Environment variables consulted for the platform language, in order.
const LANGUAGE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// With `code`, persists it; without, prints the language that would be used.
pub async fn run(code: Option<String>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let persisting = code.is_some();
    let preferences = Path::new(&config.client.preferences);
    let locale = select(preferences, code.as_deref(), platform_language())?;

    if persisting {
        println!(
            "{} {}",
            style("Language set to").green(),
            style(locale).bold()
        );
    } else {
        println!("{}", locale);
    }
    Ok(())
}

/// Persists `code` to the preferences file at `preferences`, or resolves the
/// language from it (and `platform`) when no code is given.
pub fn select(
    preferences: &Path,
    code: Option<&str>,
    platform: Option<String>,
) -> anyhow::Result<Locale> {
    let store = FilePreferences::new(preferences);
    match code {
        Some(code) => {
            let locale: Locale = code.parse()?;
            persist_locale(&store, locale)?;
            Ok(locale)
        }
        None => Ok(resolve_locale(&store, platform.as_deref())),
    }
}

/// The language reported by the environment, if any.
pub fn platform_language() -> Option<String> {
    language_from(|var| std::env::var(var).ok())
}

/// First usable value of `LC_ALL`, `LC_MESSAGES`, `LANG`, read via `lookup`.
///
/// Empty values and the `C`/`POSIX` locales say nothing about the language
/// and are skipped.
pub fn language_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LANGUAGE_VARS
        .iter()
        .filter_map(|var| lookup(*var))
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}
