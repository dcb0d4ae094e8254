// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for the bella-ciao client layer.
//!
//! This module defines [`ClientError`], the error enum returned by every
//! fallible operation in the crate.
//!
//! # Error Categories
//!
//! - **Status errors**: the backend answered with a non-success status
//!   ([`ClientError::CouldNotGet`], [`ClientError::Rejected`],
//!   [`ClientError::NotLoggedIn`])
//! - **Ballot errors**: a vote refused before it is sent
//! - **Transport errors**: the request never completed
//! - **Serialization errors**: a response body was not the expected JSON
//! - **Local errors**: bad URLs, unparseable dates, preference storage
//!
//! Validation failures are *not* errors: a composed validator returns an
//! [`ErrorMap`](crate::validation::ErrorMap) and the caller decides.

use reqwest::StatusCode;
use thiserror::Error;

/// The main error type for client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A GET request was answered with a non-success status.
    #[error("could not get {url} (status {status})")]
    CouldNotGet {
        /// The URL that was requested.
        url: String,
        /// The status returned by the server.
        status: StatusCode,
    },

    /// A POST made on the caller's behalf was answered with a non-success
    /// status.
    #[error("{url} rejected the request (status {status})")]
    Rejected {
        /// The URL that was posted to.
        url: String,
        /// The status returned by the server.
        status: StatusCode,
    },

    /// The election is not accepting ballots at this time.
    #[error("election {0} is not open for voting")]
    ElectionClosed(i64),

    /// A ballot ranks fewer or more candidates than the election allows.
    #[error("ballot ranks {selected} candidate(s), election allows {min} to {max}")]
    InvalidSelection {
        /// Candidates on the ballot.
        selected: usize,
        /// Fewest candidates allowed.
        min: u32,
        /// Most candidates allowed.
        max: u32,
    },

    /// The identity endpoint rejected the session.
    #[error("not logged in")]
    NotLoggedIn,

    /// The request failed before a response was received, or the body could
    /// not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be resolved against the client's base URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// The offending URL as given by the caller.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// A timestamp could not be parsed.
    #[error("invalid date {0:?}")]
    InvalidDate(String),

    /// Reading or writing persisted preferences failed.
    #[error("preferences error: {0}")]
    Preferences(String),
}

/// Convenience type alias for Results with [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
