// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # bella-ciao
//!
//! Client-side helpers for the bella-ciao election application.
//!
//! The backend owns authentication, vote recording and tallying; this crate
//! is the layer a UI sits on to talk to it.
//!
//! ## Features
//!
//! - Form extraction with multi-select fields ([`form`])
//! - Composable field validators ([`validation`])
//! - JSON and multipart submission, JSON fetching ([`client`])
//! - An injectable session context for the current user ([`session`])
//! - Deterministic display language selection ([`locale`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bella_ciao::{extract_form_values, validation_funcs, validate_required, ApiClient};
//!
//! let values = extract_form_values(&form, &["candidates"]);
//! let validate = validation_funcs(vec![validate_required("name")]);
//! if validate(&values).is_empty() {
//!     let response = client.submit_form_json("/api/candidates/add", values, None).await?;
//! }
//! ```

/// REST client helpers.
pub mod client;
/// Error types.
pub mod error;
/// Form data and value extraction.
pub mod form;
/// Display language selection and persisted preferences.
pub mod locale;
/// Backend records.
pub mod models;
/// Current user context.
pub mod session;
/// Sorting, date formatting and pacing helpers.
pub mod util;
/// Validators and their composition.
pub mod validation;

pub use client::ApiClient;
pub use error::*;
pub use form::{extract_form_values, FieldValue, FieldValueMap, FilePart, FormData, FormEntry};
pub use locale::{resolve_locale, Locale, PreferenceStore, LANG_STORAGE_KEY};
pub use models::{
    Candidate, CountType, Election, Role, User, UserFile, UserMessage, Vote, VoteReceipt,
};
pub use session::Session;
pub use util::{format_date, sleep, sort_by_field, SortFunc};
pub use validation::{
    validate_array_length_positive, validate_required, validation_funcs, ErrorMap, Validator,
};
