// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Collects the users of a city through the GitHub user search.
//!
//! The search index can lag behind or format locations differently from the
//! live profile, so every hit is re-checked against the detail record before
//! it is kept.

use std::collections::HashSet;

use tracing::{debug, error, info};

use crate::{
    client::GitHubApi,
    config::Settings,
    pacing::Pacer,
    pagination::{PageCursor, PageStep},
    progress::spinner,
    records::UserRecord,
};

/// Builds the search query for a location and follower threshold.
///
/// # Examples
///
/// ```
/// use ghcensus::search_query;
///
/// assert_eq!(search_query("Basel", 10,), "location:\"Basel\" followers:>10");
/// ```
pub fn search_query(location: &str, min_followers: u32,) -> String
{
    format!("location:\"{location}\" followers:>{min_followers}")
}

/// Whether a profile location mentions `city`, ignoring case.
pub fn location_matches(profile_location: Option<&str,>, city: &str,) -> bool
{
    profile_location.is_some_and(|value| value.to_lowercase().contains(&city.to_lowercase(),),)
}

/// Collects users for every configured search location.
///
/// Hits already collected are skipped. A failed detail fetch skips that user;
/// a failed search request ends the current location's pagination while
/// keeping everything collected so far. The pacer runs after each detail
/// fetch and before each further page.
///
/// # Example
///
/// ```no_run
/// use ghcensus::{OctocrabClient, Pacer, Settings, collect_users};
///
/// # async fn example() -> Result<(), masterror::AppError> {
/// let client = OctocrabClient::new("ghp_token",)?;
/// let settings = Settings::default();
/// let users = collect_users(&client, &settings, &Pacer::new(settings.request_delay,),).await;
/// println!("Collected {} users", users.len());
/// # Ok(())
/// # }
/// ```
pub async fn collect_users<A,>(api: &A, settings: &Settings, pacer: &Pacer,) -> Vec<UserRecord,>
where
    A: GitHubApi,
{
    let pb = spinner(format!("Searching users in {}...", settings.location),);
    let mut users: Vec<UserRecord,> = Vec::new();
    let mut collected: HashSet<String,> = HashSet::new();

    for location in &settings.search_locations {
        info!("Searching for users in: {location}");
        let query = search_query(location, settings.min_followers,);
        let mut cursor = PageCursor::new(settings.page_size,);

        loop {
            info!("Query: {query}, Page: {}", cursor.page());
            let page = match api.search_users(&query, cursor.page(), cursor.page_size(),).await {
                Ok(page,) => page,
                Err(e,) => {
                    error!("User search failed for {location} on page {}: {e}", cursor.page());
                    break;
                }
            };
            info!(
                "Found {} users on page {} of {} matches",
                page.items.len(),
                cursor.page(),
                page.total_count
            );

            for hit in &page.items {
                if collected.contains(&hit.login,) {
                    debug!("Skipping already collected user: {}", hit.login);
                    continue;
                }

                info!("Fetching details for user: {}", hit.login);
                match api.user_profile(&hit.login,).await {
                    Ok(profile,)
                        if location_matches(profile.location.as_deref(), &settings.location,) =>
                    {
                        info!(
                            "Added user: {} ({})",
                            profile.login,
                            profile.location.as_deref().unwrap_or_default()
                        );
                        collected.insert(profile.login.clone(),);
                        users.push(UserRecord::from_profile(&profile,),);
                        pb.set_message(format!("Collected {} users...", users.len()),);
                    }
                    Ok(profile,) => {
                        debug!(
                            "Skipping {}: location {:?} does not mention {}",
                            profile.login, profile.location, settings.location
                        );
                    }
                    Err(e,) => error!("Error fetching user {}: {e}", hit.login),
                }

                pacer.pause().await;
            }

            match cursor.advance(page.items.len(), users.len(),) {
                PageStep::Continue => pacer.pause().await,
                PageStep::Exhausted | PageStep::CapReached => break,
            }
        }
    }

    info!("Total unique {} users found: {}", settings.location, users.len());
    pb.finish_with_message(format!("Collected {} users", users.len()),);
    users
}
