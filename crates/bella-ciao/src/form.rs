// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Form data and field value extraction.
//!
//! [`FormData`] is an ordered list of named entries, the same shape a browser
//! form submits. [`extract_form_values`] flattens it into a [`FieldValueMap`]
//! ready for validation and JSON submission.
//!
//! # Example
//!
//! ```rust
//! use bella_ciao::form::{extract_form_values, FieldValue, FormData};
//!
//! let form = FormData::new()
//!     .with_text("name", "Ada")
//!     .with_text("candidates", "1")
//!     .with_text("candidates", "3");
//!
//! let values = extract_form_values(&form, &["candidates"]);
//! assert_eq!(values["name"], FieldValue::from("Ada"));
//! assert_eq!(values["candidates"], FieldValue::from(vec!["1", "3"]));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extracted form data: field name to value.
pub type FieldValueMap = BTreeMap<String, FieldValue>;

/// The value of one extracted field.
///
/// Serializes as a plain JSON string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A regular field: the last value submitted under its name.
    Single(String),
    /// A multi-select field: every submitted value, in order.
    Multi(Vec<String>),
}

impl FieldValue {
    /// Returns the scalar value, if this is a single-valued field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Multi(_) => None,
        }
    }

    /// Returns the values as a sequence; a single value is a one-element sequence.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Single(s) => vec![s.as_str()],
            FieldValue::Multi(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Single(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Single(s)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::Multi(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::Multi(v)
    }
}

/// An uploaded file inside a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub mime: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// One entry of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEntry {
    /// A text input, select option, textarea, etc.
    Text(String),
    /// A file input.
    File(FilePart),
}

/// An ordered list of form entries.
///
/// Names may repeat; multi-select inputs submit one entry per selected option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, FormEntry)>,
}

impl FormData {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` body, keeping entry order.
    pub fn from_urlencoded(bytes: &[u8]) -> Self {
        let entries = form_urlencoded::parse(bytes)
            .map(|(k, v)| (k.into_owned(), FormEntry::Text(v.into_owned())))
            .collect();
        Self { entries }
    }

    /// Appends a text entry.
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_text(name, value);
        self
    }

    /// Appends a file entry.
    pub fn with_file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.entries.push((name.into(), FormEntry::File(file)));
        self
    }

    /// Appends a text entry in place.
    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((name.into(), FormEntry::Text(value.into())));
    }

    /// All entries in submission order.
    pub fn entries(&self) -> &[(String, FormEntry)] {
        &self.entries
    }

    /// All text values submitted under `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(k, _)| k == name)
            .filter_map(|(_, entry)| match entry {
                FormEntry::Text(v) => Some(v.as_str()),
                FormEntry::File(_) => None,
            })
            .collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the form has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens a form into a [`FieldValueMap`].
///
/// Names listed in `multiselect_fields` collect every value in order; all
/// other names keep the last value submitted. File entries have no JSON form
/// and are left out.
pub fn extract_form_values<S: AsRef<str>>(
    form: &FormData,
    multiselect_fields: &[S],
) -> FieldValueMap {
    let is_multi = |name: &str| multiselect_fields.iter().any(|f| f.as_ref() == name);
    let mut values = FieldValueMap::new();

    for (name, entry) in form.entries() {
        let FormEntry::Text(value) = entry else {
            continue;
        };

        if is_multi(name) {
            match values
                .entry(name.clone())
                .or_insert_with(|| FieldValue::Multi(Vec::new()))
            {
                FieldValue::Multi(all) => all.push(value.clone()),
                single => *single = FieldValue::Multi(vec![value.clone()]),
            }
        } else {
            values.insert(name.clone(), FieldValue::Single(value.clone()));
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn test_single_field_keeps_last_value() {
        let form = FormData::new()
            .with_text("name", "first")
            .with_text("name", "second");
        let values = extract_form_values(&form, NONE);
        assert_eq!(values["name"], FieldValue::from("second"));
    }

    #[test]
    fn test_multiselect_collects_in_order() {
        let form = FormData::new()
            .with_text("candidates", "3")
            .with_text("name", "Ada")
            .with_text("candidates", "1")
            .with_text("candidates", "2");
        let values = extract_form_values(&form, &["candidates"]);
        assert_eq!(values["candidates"], FieldValue::from(vec!["3", "1", "2"]));
        assert_eq!(values["name"], FieldValue::from("Ada"));
    }

    #[test]
    fn test_multiselect_with_one_value_is_still_a_sequence() {
        let form = FormData::new().with_text("candidates", "7");
        let values = extract_form_values(&form, &["candidates"]);
        assert_eq!(values["candidates"], FieldValue::from(vec!["7"]));
    }

    #[test]
    fn test_absent_fields_are_absent() {
        let form = FormData::new().with_text("name", "Ada");
        let values = extract_form_values(&form, &["candidates"]);
        assert!(!values.contains_key("candidates"));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_file_entries_are_skipped() {
        let form = FormData::new().with_text("description", "id card").with_file(
            "file",
            FilePart {
                file_name: "dni.pdf".to_string(),
                mime: Some("application/pdf".to_string()),
                bytes: b"%PDF".to_vec(),
            },
        );
        let values = extract_form_values(&form, NONE);
        assert_eq!(values.len(), 1);
        assert!(form.get_all("file").is_empty());
    }

    #[test]
    fn test_from_urlencoded_keeps_order_and_decodes() {
        let form = FormData::from_urlencoded(b"c=2&email=ada%40example.com&c=1");
        assert_eq!(form.len(), 3);
        assert_eq!(form.get_all("c"), vec!["2", "1"]);
        assert_eq!(form.get_all("email"), vec!["ada@example.com"]);
    }

    #[test]
    fn test_field_values_serialize_as_plain_json() {
        let form = FormData::new()
            .with_text("name", "Ada")
            .with_text("c", "1")
            .with_text("c", "2");
        let values = extract_form_values(&form, &["c"]);
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ada", "c": ["1", "2"] }));
    }
}
