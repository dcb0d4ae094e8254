// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Records exchanged with the election backend.
//!
//! These mirror the backend's JSON payloads. The client layer deserializes
//! and passes them on; the only contents it looks at are an election's voting
//! window and ballot bounds, before a vote is sent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Permission level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Registered but not yet checked by an administrator.
    #[default]
    None,
    /// Checked by an administrator; may vote.
    Validated,
    /// May manage users, candidates and elections.
    Admin,
}

/// A registered user, as returned by `/api/users/whoami`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Identity document number used to log in.
    pub unique_id: String,
    /// Permission level.
    pub role: Role,
    /// Uploaded identity documents.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub files: Vec<UserFile>,
    /// Administrator messages about the account.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<UserMessage>,
}

impl User {
    /// Returns true if the user has administrator rights.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if the user may cast votes.
    pub fn can_vote(&self) -> bool {
        self.role == Role::Validated
    }
}

/// A document uploaded by a user for identity validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFile {
    /// Backend identifier.
    pub id: i64,
    /// Original file name.
    pub name: String,
    /// What the document is.
    pub description: String,
}

/// A message left by an administrator on a user's account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage {
    /// Backend identifier.
    pub id: i64,
    /// Message text.
    pub content: String,
    /// Whether the user has addressed it.
    pub solved: bool,
}

/// A candidate standing in an election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Backend identifier.
    pub id: i64,
    /// Election the candidate stands in.
    #[serde(default)]
    pub election_id: i64,
    /// Display name.
    pub name: String,
    /// Presentation text.
    pub presentation: String,
    /// Stored image reference.
    pub image: String,
}

/// How ranked ballots are turned into points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountType {
    /// Borda count: n-1 points for first place down to 0.
    Borda,
    /// Dowdall variant: 1/rank points.
    Dowdall,
}

/// An election with its voting window and candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Election {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Voting opens.
    pub start: DateTime<Utc>,
    /// Voting closes.
    pub end: DateTime<Utc>,
    /// Whether results are published.
    pub public: bool,
    /// Counting method.
    pub count_type: CountType,
    /// Most candidates a ballot may rank.
    pub max_candidates: u32,
    /// Fewest candidates a ballot may rank.
    pub min_candidates: u32,
    /// Candidates standing.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<Candidate>,
}

impl Election {
    /// Returns true if `now` falls inside the voting window.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.start <= now && now < self.end
    }

    /// Returns true if a ballot with `selected` candidates respects the bounds.
    pub fn accepts_selection(&self, selected: usize) -> bool {
        let selected = selected as u64;
        u64::from(self.min_candidates) <= selected && selected <= u64::from(self.max_candidates)
    }
}

/// The backend encodes empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A cast ballot, as returned by the vote check endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Backend identifier.
    pub id: i64,
    /// Receipt the voter can use to check the ballot.
    pub hash: String,
    /// Ranked candidate ids, first choice first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<i64>,
}

/// Receipt handed out after a ballot is recorded.
///
/// The backend answers either with the bare hash or with the stored vote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VoteReceipt {
    /// Only the hash.
    Hash(String),
    /// The stored vote, hash included.
    Vote(Vote),
}

impl VoteReceipt {
    /// The hash the voter uses to check the ballot later.
    pub fn hash(&self) -> &str {
        match self {
            VoteReceipt::Hash(hash) => hash,
            VoteReceipt::Vote(vote) => &vote.hash,
        }
    }
}
