// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Row types of the users and repositories tables.
//!
//! Records are the normalized, flat projections of GitHub API payloads. Field
//! order matches the column order of the persisted tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::client::{RepositoryPayload, UserProfile};

/// String stored in the `hireable` column for users open to offers.
pub const HIREABLE: &str = "true";

/// Header of the users table.
pub const USER_COLUMNS: &[&str] = &[
    "login",
    "name",
    "company",
    "location",
    "email",
    "hireable",
    "bio",
    "public_repos",
    "followers",
    "following",
    "created_at",
];

/// Header of the repositories table.
pub const REPOSITORY_COLUMNS: &[&str] = &[
    "login",
    "full_name",
    "created_at",
    "stargazers_count",
    "watchers_count",
    "language",
    "has_projects",
    "has_wiki",
    "license_name",
];

/// One row of the users table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct UserRecord
{
    pub login:        String,
    pub name:         Option<String,>,
    /// Normalized company, see [`normalize_company`].
    pub company:      String,
    pub location:     String,
    pub email:        Option<String,>,
    /// `"true"`, `"false"` or `""` when the profile does not say.
    pub hireable:     String,
    pub bio:          Option<String,>,
    pub public_repos: u64,
    pub followers:    u64,
    pub following:    u64,
    pub created_at:   DateTime<Utc,>,
}

impl UserRecord
{
    /// Projects a profile detail payload onto a table row.
    pub fn from_profile(profile: &UserProfile,) -> Self
    {
        Self {
            login:        profile.login.clone(),
            name:         profile.name.clone(),
            company:      normalize_company(profile.company.as_deref(),),
            location:     profile.location.clone().unwrap_or_default(),
            email:        profile.email.clone(),
            hireable:     profile.hireable.map(|value| value.to_string(),).unwrap_or_default(),
            bio:          profile.bio.clone(),
            public_repos: profile.public_repos,
            followers:    profile.followers,
            following:    profile.following,
            created_at:   profile.created_at,
        }
    }

    /// Whether the `hireable` column holds the literal `"true"`.
    pub fn is_hireable(&self,) -> bool
    {
        self.hireable == HIREABLE
    }
}

/// One row of the repositories table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct RepositoryRecord
{
    /// Login the listing was requested for.
    pub login:            String,
    pub full_name:        String,
    pub created_at:       DateTime<Utc,>,
    pub stargazers_count: u64,
    pub watchers_count:   u64,
    pub language:         Option<String,>,
    pub has_projects:     bool,
    pub has_wiki:         bool,
    /// License key, empty when the repository has no usable license.
    pub license_name:     String,
}

impl RepositoryRecord
{
    /// Projects a repository listing item onto a table row owned by `login`.
    pub fn from_payload(login: &str, payload: &RepositoryPayload,) -> Self
    {
        Self {
            login:            login.to_owned(),
            full_name:        payload.full_name.clone(),
            created_at:       payload.created_at,
            stargazers_count: payload.stargazers_count,
            watchers_count:   payload.watchers_count,
            language:         payload.language.clone(),
            has_projects:     payload.has_projects,
            has_wiki:         payload.has_wiki,
            license_name:     license_key(&payload.full_name, payload.license.as_ref(),),
        }
    }
}

/// Normalizes a free-text company name.
///
/// Leading `@` handles and whitespace, in any number and order, are removed
/// together with trailing whitespace, and the rest is upper-cased. Missing or
/// blank input yields an empty string.
///
/// # Examples
///
/// ```
/// use ghcensus::normalize_company;
///
/// assert_eq!(normalize_company(Some(" @novartis ",),), "NOVARTIS");
/// assert_eq!(normalize_company(None,), "");
/// ```
pub fn normalize_company(raw: Option<&str,>,) -> String
{
    raw.map(|value| {
        value
            .trim_start_matches(|ch: char| ch == '@' || ch.is_whitespace(),)
            .trim_end()
            .to_uppercase()
    },)
    .unwrap_or_default()
}

/// Extracts the license key from a repository's `license` payload.
///
/// Absent and `null` licenses map to an empty string. Payloads that are not
/// an object with a string `key` are logged and also map to an empty string.
pub fn license_key(full_name: &str, license: Option<&Value,>,) -> String
{
    match license {
        None | Some(Value::Null,) => String::new(),
        Some(Value::Object(fields,),) => match fields.get("key",) {
            Some(Value::String(key,),) => key.clone(),
            _ => {
                warn!("License key missing for {full_name}");
                String::new()
            }
        },
        Some(other,) => {
            warn!("Malformed license payload for {full_name}: {other}");
            String::new()
        }
    }
}
