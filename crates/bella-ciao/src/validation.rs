// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Field validators and their composition.
//!
//! A [`Validator`] looks at a [`FieldValueMap`] and reports problems as an
//! [`ErrorMap`]. An empty map means the values are acceptable.
//!
//! ```rust
//! use bella_ciao::form::{FieldValue, FieldValueMap};
//! use bella_ciao::validation::{validate_array_length_positive, validate_required, validation_funcs};
//!
//! let validate = validation_funcs(vec![
//!     validate_required("name"),
//!     validate_array_length_positive("candidates"),
//! ]);
//!
//! let mut values = FieldValueMap::new();
//! values.insert("name".into(), FieldValue::from("Ada"));
//! let errors = validate(&values);
//! assert_eq!(errors.get("candidates").map(String::as_str), Some("error"));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::form::{FieldValue, FieldValueMap};

/// Validation errors: field name to message. One message per field.
pub type ErrorMap = BTreeMap<String, String>;

/// A pure check over extracted form values.
pub type Validator = Arc<dyn Fn(&FieldValueMap) -> ErrorMap + Send + Sync>;

/// Message reported by [`validate_array_length_positive`].
pub const SELECTION_REQUIRED: &str = "error";

/// Composes validators into one.
///
/// Every validator runs, in order, and their maps are merged. When two
/// validators flag the same field the later message replaces the earlier.
pub fn validation_funcs(validators: Vec<Validator>) -> Validator {
    Arc::new(move |values: &FieldValueMap| {
        let mut errors = ErrorMap::new();
        for validator in &validators {
            errors.extend(validator(values));
        }
        errors
    })
}

/// Wraps a closure as a [`Validator`].
pub fn validator<F>(f: F) -> Validator
where
    F: Fn(&FieldValueMap) -> ErrorMap + Send + Sync + 'static,
{
    Arc::new(f)
}

/// The field must be present and hold a non-blank value.
///
/// A multi-valued field passes when at least one of its values is non-blank.
pub fn validate_required(name: &str) -> Validator {
    let name = name.to_string();
    Arc::new(move |values: &FieldValueMap| {
        let present = values
            .get(&name)
            .map(|v| v.values().iter().any(|s| !s.trim().is_empty()))
            .unwrap_or(false);

        if present {
            ErrorMap::new()
        } else {
            ErrorMap::from([(name.clone(), format!("{} cannot be empty", name))])
        }
    })
}

/// The field must be present and hold at least one selected value.
pub fn validate_array_length_positive(name: &str) -> Validator {
    let name = name.to_string();
    Arc::new(move |values: &FieldValueMap| {
        let selected = match values.get(&name) {
            Some(FieldValue::Multi(v)) => !v.is_empty(),
            Some(FieldValue::Single(s)) => !s.is_empty(),
            None => false,
        };

        if selected {
            ErrorMap::new()
        } else {
            ErrorMap::from([(name.clone(), SELECTION_REQUIRED.to_string())])
        }
    })
}
