// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Collects repository metadata for known users.
//!
//! Listings are requested most recently pushed first and capped per user, so
//! the table favours active repositories for prolific accounts.

use tracing::{error, info};

use crate::{
    client::GitHubApi,
    config::Settings,
    pacing::Pacer,
    pagination::{PageCursor, PageStep},
    progress::spinner,
    records::{RepositoryRecord, UserRecord},
};

/// Collects up to `settings.max_repositories` repositories owned by `login`.
///
/// A failed request ends this login's pagination and keeps what was already
/// collected.
pub async fn collect_repositories<A,>(
    api: &A,
    login: &str,
    settings: &Settings,
    pacer: &Pacer,
) -> Vec<RepositoryRecord,>
where
    A: GitHubApi,
{
    info!("Fetching repositories for user: {login}");
    let mut repositories: Vec<RepositoryRecord,> = Vec::new();
    let mut cursor = PageCursor::with_cap(settings.page_size, settings.max_repositories,);

    while cursor.has_capacity(repositories.len(),) {
        let page = match api.user_repositories(login, cursor.page(), cursor.page_size(),).await {
            Ok(page,) => page,
            Err(e,) => {
                error!("Error fetching repos for {login} on page {}: {e}", cursor.page());
                break;
            }
        };

        repositories
            .extend(page.iter().map(|payload| RepositoryRecord::from_payload(login, payload,),),);
        info!("Fetched {} repositories for {login} (page {})", page.len(), cursor.page());

        match cursor.advance(page.len(), repositories.len(),) {
            PageStep::Continue => pacer.pause().await,
            PageStep::Exhausted | PageStep::CapReached => break,
        }
    }

    repositories.truncate(settings.max_repositories,);
    repositories
}

/// Collects repositories for every login in order and concatenates them.
///
/// # Example
///
/// ```no_run
/// use ghcensus::{OctocrabClient, Pacer, Settings, collect_all_repositories};
///
/// # async fn example() -> Result<(), masterror::AppError> {
/// let client = OctocrabClient::new("ghp_token",)?;
/// let settings = Settings::default();
/// let logins = vec!["octocat".to_owned()];
/// let repos = collect_all_repositories(&client, &logins, &settings, &Pacer::default(),).await;
/// println!("Collected {} repositories", repos.len());
/// # Ok(())
/// # }
/// ```
pub async fn collect_all_repositories<A,>(
    api: &A,
    logins: &[String],
    settings: &Settings,
    pacer: &Pacer,
) -> Vec<RepositoryRecord,>
where
    A: GitHubApi,
{
    let pb = spinner(format!("Fetching repositories for {} users...", logins.len()),);
    let mut all = Vec::new();

    for (index, login,) in logins.iter().enumerate() {
        pb.set_message(format!("[{}/{}] {login}", index + 1, logins.len()),);
        let repositories = collect_repositories(api, login, settings, pacer,).await;
        all.extend(repositories,);
    }

    info!("Total repositories collected: {}", all.len());
    pb.finish_with_message(format!("Collected {} repositories", all.len()),);
    all
}

/// Logins of a users table, in table order.
pub fn logins_of(users: &[UserRecord],) -> Vec<String,>
{
    users.iter().map(|user| user.login.clone(),).collect()
}
