// Copyright 2019-2026 Bella Ciao contributors
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTTP helpers for talking to the election backend.
//!
//! Every method is a single request/response exchange: no retries, no
//! timeouts beyond the HTTP client's defaults.
//!
//! # Example
//!
//! ```rust,no_run
//! use bella_ciao::{ApiClient, Session};
//!
//! # async fn run() -> bella_ciao::Result<()> {
//! let client = ApiClient::new("http://127.0.0.1:3000")?;
//! let session = Session::new();
//! client.whoami(&session).await?;
//!
//! let candidates = client.candidates().await?;
//! println!("{} candidate(s)", candidates.len());
//! # Ok(())
//! # }
//! ```

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use chrono::Utc;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::form::{FieldValueMap, FormData, FormEntry};
use crate::models::{Candidate, Election, User, Vote, VoteReceipt};
use crate::session::Session;
use crate::util::SortFunc;

/// Backend endpoints used by the client, relative to the client's base URL.
pub mod endpoints {
    /// The current session's identity.
    pub const WHOAMI: &str = "/api/users/whoami";
    /// Every candidate.
    pub const CANDIDATES: &str = "/api/candidates/get";
    /// Every election visible to the caller.
    pub const ELECTIONS: &str = "/api/elections/get";
    /// Records a ballot for the logged-in user.
    pub const VOTE: &str = "/api/elections/vote";
    /// Looks a ballot up by its receipt hash.
    pub const CHECK_VOTE: &str = "/api/elections/vote/check";
}

/// Reshapes extracted values before they are sent.
pub type JsonFunc<'a> = &'a dyn Fn(FieldValueMap) -> JsonValue;

/// Client for the election backend's REST API.
///
/// Relative URLs are resolved against the base URL given at construction;
/// absolute URLs are used as they are.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Creates a client that sends through an existing `reqwest::Client`.
    ///
    /// Useful to share a cookie store between clients.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { http, base_url })
    }

    /// The base URL relative requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `url` against the base URL.
    pub fn url(&self, url: &str) -> Result<Url> {
        self.base_url
            .join(url)
            .map_err(|source| ClientError::InvalidUrl {
                url: url.to_string(),
                source,
            })
    }

    /// Fetches and parses a JSON document.
    ///
    /// Fails with [`ClientError::CouldNotGet`] on a non-success status.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.fetch(url).await?;
        Ok(response.json().await?)
    }

    /// Fetches a JSON array and sorts it with `sort_func`.
    ///
    /// The sort is stable. Without a sort function the array is returned as
    /// received. A non-array body is returned untouched.
    pub async fn get_sorted(&self, url: &str, sort_func: Option<&SortFunc>) -> Result<JsonValue> {
        let mut value: JsonValue = self.get(url).await?;
        if let (Some(cmp), JsonValue::Array(items)) = (sort_func, &mut value) {
            items.sort_by(|a, b| cmp(a, b));
        }
        Ok(value)
    }

    /// Posts `values` as JSON and returns the raw response.
    ///
    /// The status is not checked; callers decide what a failure means.
    pub async fn post<T: Serialize + ?Sized>(&self, url: &str, values: &T) -> Result<Response> {
        let url = self.url(url)?;
        debug!(%url, "POST json");
        let body = serde_json::to_vec(values)?;
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Ok(response)
    }

    /// Posts extracted form values as JSON, after an optional reshape.
    pub async fn submit_form_json(
        &self,
        url: &str,
        values: FieldValueMap,
        transform: Option<JsonFunc<'_>>,
    ) -> Result<Response> {
        match transform {
            Some(transform) => self.post(url, &transform(values)).await,
            None => self.post(url, &values).await,
        }
    }

    /// Posts a form as `multipart/form-data`, file entries included.
    ///
    /// No content type is set by hand: the multipart encoder writes the header
    /// together with the boundary it generated, and a hand-set header would
    /// carry no boundary at all.
    pub async fn submit_form(&self, url: &str, form: &FormData) -> Result<Response> {
        let url = self.url(url)?;
        debug!(%url, entries = form.len(), "POST multipart");
        let response = self
            .http
            .post(url)
            .multipart(to_multipart(form)?)
            .send()
            .await?;
        Ok(response)
    }

    /// Fetches the current session's identity and stores it in `session`.
    ///
    /// On a non-success status fails with [`ClientError::NotLoggedIn`] and
    /// leaves the session untouched.
    pub async fn whoami(&self, session: &Session) -> Result<User> {
        let url = self.url(endpoints::WHOAMI)?;
        debug!(%url, "GET whoami");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            debug!(status = %response.status(), "whoami rejected");
            return Err(ClientError::NotLoggedIn);
        }

        let user: User = response.json().await?;
        session.set_current_user(Some(user.clone()));
        Ok(user)
    }

    /// Every candidate, ordered by id.
    pub async fn candidates(&self) -> Result<Vec<Candidate>> {
        let mut candidates: Vec<Candidate> = self.get(endpoints::CANDIDATES).await?;
        candidates.sort_by_key(|c| c.id);
        Ok(candidates)
    }

    /// Every election visible to the caller, ordered by id.
    pub async fn elections(&self) -> Result<Vec<Election>> {
        let mut elections: Vec<Election> = self.get(endpoints::ELECTIONS).await?;
        elections.sort_by_key(|e| e.id);
        Ok(elections)
    }

    /// Casts a ranked ballot in `election`, first choice first.
    ///
    /// The ballot is refused locally when the election is outside its voting
    /// window or the number of ranked candidates is out of bounds. A backend
    /// refusal (not logged in, not validated, already voted) fails with
    /// [`ClientError::Rejected`].
    pub async fn cast_vote(&self, election: &Election, candidates: &[i64]) -> Result<VoteReceipt> {
        if !election.is_open_at(Utc::now()) {
            return Err(ClientError::ElectionClosed(election.id));
        }
        if !election.accepts_selection(candidates.len()) {
            return Err(ClientError::InvalidSelection {
                selected: candidates.len(),
                min: election.min_candidates,
                max: election.max_candidates,
            });
        }

        let response = self
            .post(endpoints::VOTE, &json!({ "candidates": candidates }))
            .await?;
        let response = accepted(endpoints::VOTE, response)?;
        Ok(response.json().await?)
    }

    /// Looks up the ballot recorded under `token`.
    pub async fn check_vote(&self, token: &str) -> Result<Vote> {
        let response = self
            .post(endpoints::CHECK_VOTE, &json!({ "token": token }))
            .await?;
        let response = accepted(endpoints::CHECK_VOTE, response)?;
        Ok(response.json().await?)
    }

    async fn fetch(&self, url: &str) -> Result<Response> {
        let resolved = self.url(url)?;
        debug!(url = %resolved, "GET");
        let response = self.http.get(resolved).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "GET failed");
            return Err(ClientError::CouldNotGet {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

fn accepted(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        warn!(%url, %status, "POST rejected");
        return Err(ClientError::Rejected {
            url: url.to_string(),
            status,
        });
    }
    Ok(response)
}

/// Encodes a form as multipart parts, keeping entry order.
fn to_multipart(form: &FormData) -> Result<multipart::Form> {
    let mut multipart = multipart::Form::new();
    for (name, entry) in form.entries() {
        multipart = match entry {
            FormEntry::Text(value) => multipart.text(name.clone(), value.clone()),
            FormEntry::File(file) => {
                let mut part =
                    multipart::Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
                if let Some(mime) = &file.mime {
                    part = part.mime_str(mime)?;
                }
                multipart.part(name.clone(), part)
            }
        };
    }
    Ok(multipart)
}
