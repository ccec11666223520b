// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GitHub REST access used by the collectors.
//!
//! The [`GitHubApi`] trait names the endpoints the census needs. The
//! production implementation, [`OctocrabClient`], talks to api.github.com;
//! collectors are generic over the trait so they can run against fixtures.
#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use masterror::AppError;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One page of `/search/users` results.
#[derive(Debug, Clone, Default, Deserialize,)]
pub struct SearchPage
{
    /// Matches across all pages, as estimated by the search index.
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub items: Vec<SearchHit,>,
}

/// A search hit; only the login is needed to fetch the full profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize,)]
pub struct SearchHit
{
    pub login: String,
}

/// Profile returned by `/users/{login}`.
#[derive(Debug, Clone, Deserialize,)]
pub struct UserProfile
{
    pub login: String,

    #[serde(default)]
    pub name: Option<String,>,

    #[serde(default)]
    pub company: Option<String,>,

    #[serde(default)]
    pub location: Option<String,>,

    #[serde(default)]
    pub email: Option<String,>,

    #[serde(default)]
    pub hireable: Option<bool,>,

    #[serde(default)]
    pub bio: Option<String,>,

    #[serde(default)]
    pub public_repos: u64,

    #[serde(default)]
    pub followers: u64,

    #[serde(default)]
    pub following: u64,

    pub created_at: DateTime<Utc,>,
}

/// Repository item returned by `/users/{login}/repos`.
///
/// `license` stays untyped so that a malformed payload degrades to an empty
/// license instead of failing the whole page.
#[derive(Debug, Clone, Deserialize,)]
pub struct RepositoryPayload
{
    pub full_name: String,

    pub created_at: DateTime<Utc,>,

    #[serde(default)]
    pub stargazers_count: u64,

    #[serde(default)]
    pub watchers_count: u64,

    #[serde(default)]
    pub language: Option<String,>,

    #[serde(default)]
    pub has_projects: bool,

    #[serde(default)]
    pub has_wiki: bool,

    #[serde(default)]
    pub license: Option<Value,>,
}

/// Endpoints of the GitHub REST API used by the census.
///
/// Every method performs exactly one request. Non-success responses surface
/// as errors; callers decide whether to skip, abort a loop, or fail.
pub trait GitHubApi
{
    /// Login of the account the credential belongs to (`GET /user`).
    async fn authenticated_login(&self,) -> Result<String, AppError,>;

    /// Remaining core rate-limit quota, for diagnostics only.
    async fn rate_limit_remaining(&self,) -> Result<usize, AppError,>;

    /// One page of `GET /search/users`. `page` is 1-based.
    async fn search_users(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, AppError,>;

    /// Full profile from `GET /users/{login}`.
    async fn user_profile(&self, login: &str,) -> Result<UserProfile, AppError,>;

    /// One page of `GET /users/{login}/repos`, most recently pushed first.
    async fn user_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryPayload,>, AppError,>;
}

#[derive(Debug, Serialize,)]
struct SearchParams<'a,>
{
    q:        &'a str,
    page:     u32,
    per_page: u32,
}

#[derive(Debug, Serialize,)]
struct RepositoryParams
{
    sort:      &'static str,
    direction: &'static str,
    page:      u32,
    per_page:  u32,
}

/// [`GitHubApi`] backed by an authenticated [`Octocrab`] instance.
#[derive(Debug, Clone,)]
pub struct OctocrabClient
{
    octocrab: Octocrab,
}

impl OctocrabClient
{
    /// Builds a client that sends `token` as a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the underlying HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ghcensus::{GitHubApi, OctocrabClient};
    ///
    /// # async fn example() -> Result<(), masterror::AppError> {
    /// let client = OctocrabClient::new("ghp_example",)?;
    /// let login = client.authenticated_login().await?;
    /// println!("Authenticated as {login}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(token: &str,) -> Result<Self, AppError,>
    {
        let octocrab = Octocrab::builder().personal_token(token,).build().map_err(|e| {
            AppError::unauthorized(format!("failed to initialize GitHub client: {e}"),)
        },)?;

        Ok(Self {
            octocrab,
        },)
    }
}

impl GitHubApi for OctocrabClient
{
    async fn authenticated_login(&self,) -> Result<String, AppError,>
    {
        let user = self
            .octocrab
            .current()
            .user()
            .await
            .map_err(|e| AppError::unauthorized(format!("GitHub rejected the token: {e}"),),)?;
        Ok(user.login,)
    }

    async fn rate_limit_remaining(&self,) -> Result<usize, AppError,>
    {
        let limits = self
            .octocrab
            .ratelimit()
            .get()
            .await
            .map_err(|e| AppError::service(format!("failed to read rate limit: {e}"),),)?;
        Ok(limits.resources.core.remaining,)
    }

    async fn search_users(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, AppError,>
    {
        debug!("GET /search/users q={query} page={page}");
        let params = SearchParams {
            q: query,
            page,
            per_page,
        };
        self.octocrab
            .get("/search/users", Some(&params,),)
            .await
            .map_err(|e| AppError::service(format!("user search failed: {e}"),),)
    }

    async fn user_profile(&self, login: &str,) -> Result<UserProfile, AppError,>
    {
        debug!("GET /users/{login}");
        self.octocrab
            .get(format!("/users/{login}"), None::<&(),>,)
            .await
            .map_err(|e| AppError::service(format!("failed to fetch user {login}: {e}"),),)
    }

    async fn user_repositories(
        &self,
        login: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryPayload,>, AppError,>
    {
        debug!("GET /users/{login}/repos page={page}");
        let params = RepositoryParams {
            sort: "pushed",
            direction: "desc",
            page,
            per_page,
        };
        self.octocrab
            .get(format!("/users/{login}/repos"), Some(&params,),)
            .await
            .map_err(|e| AppError::service(format!("failed to fetch repos for {login}: {e}"),),)
    }
}
