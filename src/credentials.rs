// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GitHub credential checks performed before any collection starts.
//!
//! Tokens are cleaned of stray whitespace and quotes, their format is checked
//! against the known personal access token prefixes, and the credential is
//! verified against the API. Only a missing or rejected token is fatal.

use std::fmt;

use regex::Regex;
use tracing::{info, warn};

use crate::{client::GitHubApi, error::Error};

const TOKEN_PATTERN: &str = r"^(?:ghp_|github_pat_)\S+$";

/// Cleaned GitHub credential. The value is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq,)]
pub struct Token(String,);

impl Token
{
    pub fn expose(&self,) -> &str
    {
        &self.0
    }
}

impl fmt::Debug for Token
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str("Token(***)",)
    }
}

/// Validates and cleans a raw token, typically read from `GITHUB_TOKEN`.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the token is missing or blank. A token
/// without a recognised prefix only produces a warning.
///
/// # Examples
///
/// ```
/// use ghcensus::validate_token;
///
/// let token = validate_token(Some(" 'ghp_abc123' ",),).expect("token present",);
/// assert_eq!(token.expose(), "ghp_abc123");
/// assert!(validate_token(None,).is_err());
/// ```
pub fn validate_token(raw: Option<&str,>,) -> Result<Token, Error,>
{
    let cleaned = raw
        .map(|value| value.trim().trim_matches(|ch: char| ch == '\'' || ch == '"',).trim(),)
        .filter(|value| !value.is_empty(),)
        .ok_or_else(|| Error::validation("GitHub token not found, set GITHUB_TOKEN",),)?;

    if !has_known_prefix(cleaned,)? {
        warn!("Token format is incorrect, expected a ghp_ or github_pat_ prefix");
    }

    Ok(Token(cleaned.to_owned(),),)
}

fn has_known_prefix(token: &str,) -> Result<bool, Error,>
{
    let pattern = Regex::new(TOKEN_PATTERN,)
        .map_err(|e| Error::validation(format!("invalid token pattern: {e}"),),)?;
    Ok(pattern.is_match(token,),)
}

/// Confirms that the API accepts the credential and returns the login.
///
/// The remaining rate-limit quota is logged when available; failing to read
/// it is not an error.
///
/// # Errors
///
/// Returns [`Error::Unauthorized`] when the API rejects the credential.
pub async fn verify_token<A,>(api: &A,) -> Result<String, Error,>
where
    A: GitHubApi,
{
    let login = api
        .authenticated_login()
        .await
        .map_err(|e| Error::unauthorized(format!("invalid GitHub token: {e}"),),)?;
    info!("Authenticated as: {login}");

    match api.rate_limit_remaining().await {
        Ok(remaining,) => info!("Rate limit remaining: {remaining}"),
        Err(e,) => info!("Rate limit remaining: unknown ({e})"),
    }

    Ok(login,)
}
