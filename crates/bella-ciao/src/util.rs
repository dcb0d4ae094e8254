// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Small helpers for list display and pacing.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value as JsonValue;

use crate::error::{ClientError, Result};
use crate::locale::Locale;

/// A three-way comparison between two JSON records.
pub type SortFunc = Box<dyn Fn(&JsonValue, &JsonValue) -> Ordering + Send + Sync>;

/// Orders records ascending by `field`.
///
/// Values are ranked by kind first: missing or `null`, then booleans,
/// numbers, strings, arrays and objects. Within a kind numbers compare
/// numerically and strings lexicographically; arrays and objects tie. The
/// result is a total order, so it is safe to hand to `sort_by`, and a stable
/// sort keeps tied records where they were.
pub fn sort_by_field(field: &str) -> SortFunc {
    let field = field.to_string();
    Box::new(move |a, b| compare_values(a.get(&field), b.get(&field)))
}

fn kind_rank(value: Option<&JsonValue>) -> u8 {
    match value {
        None | Some(JsonValue::Null) => 0,
        Some(JsonValue::Bool(_)) => 1,
        Some(JsonValue::Number(_)) => 2,
        Some(JsonValue::String(_)) => 3,
        Some(JsonValue::Array(_)) => 4,
        Some(JsonValue::Object(_)) => 5,
    }
}

fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => compare_numbers(x, y),
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x.cmp(&y);
    }
    let x = x.as_f64().unwrap_or(f64::NAN);
    let y = y.as_f64().unwrap_or(f64::NAN);
    x.total_cmp(&y)
}

/// Renders a serialized timestamp in local time, laid out for `locale`.
///
/// Accepts RFC 3339 (`2024-05-01T08:00:00Z`, `2024-05-01T10:00:00+02:00`).
pub fn format_date(s: &str, locale: Locale) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(s.trim())
        .map_err(|_| ClientError::InvalidDate(s.to_string()))?;
    Ok(format_in(&parsed.with_timezone(&Local), locale))
}

fn format_in<Tz: TimeZone>(dt: &DateTime<Tz>, locale: Locale) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let pattern = match locale {
        Locale::En => "%-m/%-d/%Y, %-I:%M:%S %p",
        Locale::Es | Locale::Ca => "%-d/%-m/%Y, %-H:%M:%S",
    };
    dt.format(pattern).to_string()
}

/// Suspends the calling task for `duration`.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await
}
