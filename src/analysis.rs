// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Questions answered over the users and repositories tables.
//!
//! Every query is a pure function of the loaded rows. Ordering ties are
//! resolved deterministically so that identical tables always yield identical
//! answers: rankings and frequency counts keep table order, while queries 7,
//! 14 and 16 fall back to alphabetical order.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, HashSet},
};

use chrono::{Datelike, Weekday};

use crate::{
    records::{RepositoryRecord, UserRecord},
    stats::{mean, ols_slope, pearson},
};

/// Accounts created after this instant (2020-01-01T00:00:00Z) count as recent.
const RECENT_SIGNUP_EPOCH: i64 = 1_577_836_800;

/// Top 5 logins by follower count.
pub fn top_followers(users: &[UserRecord],) -> Vec<String,>
{
    rank_descending(users, 5, |user| user.followers as f64,)
}

/// The 5 logins registered first.
pub fn earliest_users(users: &[UserRecord],) -> Vec<String,>
{
    let mut ordered: Vec<&UserRecord,> = users.iter().collect();
    ordered.sort_by_key(|user| user.created_at,);
    ordered.into_iter().take(5,).map(|user| user.login.clone(),).collect()
}

/// The 3 most common non-empty license keys.
pub fn top_licenses(repositories: &[RepositoryRecord],) -> Vec<String,>
{
    let licenses = repositories
        .iter()
        .map(|repo| repo.license_name.as_str(),)
        .filter(|license| !license.is_empty(),);
    frequencies(licenses,)
        .into_iter()
        .take(3,)
        .map(|(license, _,)| license.to_owned(),)
        .collect()
}

/// The most common company; users without one count under `""`.
pub fn most_common_company(users: &[UserRecord],) -> Option<String,>
{
    most_frequent(users.iter().map(|user| user.company.as_str(),), 0,)
}

/// The most common repository language.
pub fn most_common_language(repositories: &[RepositoryRecord],) -> Option<String,>
{
    most_frequent(languages(repositories.iter(),), 0,)
}

/// The second most common language among repositories of users who joined
/// after 2020.
pub fn second_language_after_2020(
    users: &[UserRecord],
    repositories: &[RepositoryRecord],
) -> Option<String,>
{
    let recent: HashSet<&str,> = users
        .iter()
        .filter(|user| user.created_at.timestamp() > RECENT_SIGNUP_EPOCH,)
        .map(|user| user.login.as_str(),)
        .collect();
    let owned = repositories.iter().filter(|repo| recent.contains(repo.login.as_str(),),);
    most_frequent(languages(owned,), 1,)
}

/// The language whose repositories have the highest mean star count.
pub fn highest_average_stars_language(repositories: &[RepositoryRecord],) -> Option<String,>
{
    let mut totals: BTreeMap<&str, (u64, u64,),> = BTreeMap::new();
    for repo in repositories {
        if let Some(language,) = repo.language.as_deref().filter(|value| !value.is_empty(),) {
            let entry = totals.entry(language,).or_default();
            entry.0 += repo.stargazers_count;
            entry.1 += 1;
        }
    }

    let mut best: Option<(&str, f64,),> = None;
    for (language, (stars, count,),) in totals {
        let average = stars as f64 / count as f64;
        if best.is_none_or(|(_, top,)| average > top,) {
            best = Some((language, average,),);
        }
    }
    best.map(|(language, _,)| language.to_owned(),)
}

/// Top 5 logins by `followers / (1 + following)`.
pub fn top_leaders(users: &[UserRecord],) -> Vec<String,>
{
    rank_descending(users, 5, |user| user.followers as f64 / (1.0 + user.following as f64),)
}

/// Pearson correlation between followers and public repositories.
pub fn followers_repos_correlation(users: &[UserRecord],) -> f64
{
    let followers: Vec<f64,> = users.iter().map(|user| user.followers as f64,).collect();
    let repos: Vec<f64,> = users.iter().map(|user| user.public_repos as f64,).collect();
    pearson(&followers, &repos,)
}

/// Extra followers gained per additional public repository.
pub fn followers_per_repo_slope(users: &[UserRecord],) -> f64
{
    let repos: Vec<f64,> = users.iter().map(|user| user.public_repos as f64,).collect();
    let followers: Vec<f64,> = users.iter().map(|user| user.followers as f64,).collect();
    ols_slope(&repos, &followers,)
}

/// Correlation between the projects and wiki flags.
pub fn projects_wiki_correlation(repositories: &[RepositoryRecord],) -> f64
{
    let projects: Vec<f64,> =
        repositories.iter().map(|repo| indicator(repo.has_projects,),).collect();
    let wiki: Vec<f64,> = repositories.iter().map(|repo| indicator(repo.has_wiki,),).collect();
    pearson(&projects, &wiki,)
}

/// Mean `following` of hireable users minus that of everyone else.
pub fn hireable_following_difference(users: &[UserRecord],) -> f64
{
    let (hireable, others,) = split_by_hireable(users, |user| user.following as f64,);
    mean(&hireable,) - mean(&others,)
}

/// Followers gained per additional word of bio.
pub fn bio_length_slope(users: &[UserRecord],) -> f64
{
    let (words, followers,): (Vec<f64,>, Vec<f64,>,) = users
        .iter()
        .filter_map(|user| {
            let count = user.bio.as_deref()?.split_whitespace().count();
            (count > 0).then_some((count as f64, user.followers as f64,),)
        },)
        .unzip();
    ols_slope(&words, &followers,)
}

/// Top 5 logins by repositories created on a Saturday or Sunday (UTC).
pub fn top_weekend_creators(repositories: &[RepositoryRecord],) -> Vec<String,>
{
    let mut counts: BTreeMap<&str, usize,> = BTreeMap::new();
    for repo in repositories {
        if matches!(repo.created_at.weekday(), Weekday::Sat | Weekday::Sun) {
            *counts.entry(repo.login.as_str(),).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, usize,),> = counts.into_iter().collect();
    ranked.sort_by(|left, right| right.1.cmp(&left.1,),);
    ranked.into_iter().take(5,).map(|(login, _,)| login.to_owned(),).collect()
}

/// Share of hireable users with a public email minus the same share for
/// everyone else.
pub fn hireable_email_difference(users: &[UserRecord],) -> f64
{
    let (hireable, others,) = split_by_hireable(users, |user| {
        indicator(user.email.as_deref().is_some_and(|email| !email.is_empty(),),)
    },);
    mean(&hireable,) - mean(&others,)
}

/// The most frequent surname(s), alphabetically.
///
/// A surname is the last whitespace-separated word of the `name` column.
pub fn most_common_surnames(users: &[UserRecord],) -> Vec<String,>
{
    let surnames =
        users.iter().filter_map(|user| user.name.as_deref()?.split_whitespace().next_back(),);
    let counted = frequencies(surnames,);
    let Some(top,) = counted.first().map(|(_, count,)| *count,) else {
        return Vec::new();
    };

    let mut tied: Vec<String,> = counted
        .into_iter()
        .filter(|(_, count,)| *count == top,)
        .map(|(surname, _,)| surname.to_owned(),)
        .collect();
    tied.sort();
    tied
}

/// Stable descending ranking; equal keys keep table order.
fn rank_descending<F,>(users: &[UserRecord], limit: usize, key: F,) -> Vec<String,>
where
    F: Fn(&UserRecord,) -> f64,
{
    let mut ranked: Vec<(f64, &str,),> =
        users.iter().map(|user| (key(user,), user.login.as_str(),),).collect();
    ranked.sort_by(|left, right| right.0.partial_cmp(&left.0,).unwrap_or(Ordering::Equal,),);
    ranked.into_iter().take(limit,).map(|(_, login,)| login.to_owned(),).collect()
}

/// Value counts, most frequent first; equal counts keep first appearance.
fn frequencies<'a, I,>(values: I,) -> Vec<(&'a str, usize,),>
where
    I: IntoIterator<Item = &'a str,>,
{
    let mut position: HashMap<&'a str, usize,> = HashMap::new();
    let mut counted: Vec<(&'a str, usize,),> = Vec::new();
    for value in values {
        match position.get(value,) {
            Some(&index,) => counted[index].1 += 1,
            None => {
                position.insert(value, counted.len(),);
                counted.push((value, 1,),);
            }
        }
    }
    counted.sort_by(|left, right| right.1.cmp(&left.1,),);
    counted
}

fn most_frequent<'a, I,>(values: I, rank: usize,) -> Option<String,>
where
    I: IntoIterator<Item = &'a str,>,
{
    frequencies(values,).get(rank,).map(|(value, _,)| (*value).to_owned(),)
}

fn languages<'a, I,>(repositories: I,) -> impl Iterator<Item = &'a str,>
where
    I: Iterator<Item = &'a RepositoryRecord,>,
{
    repositories
        .filter_map(|repo| repo.language.as_deref(),)
        .filter(|language| !language.is_empty(),)
}

fn split_by_hireable<F,>(users: &[UserRecord], value: F,) -> (Vec<f64,>, Vec<f64,>,)
where
    F: Fn(&UserRecord,) -> f64,
{
    let mut hireable = Vec::new();
    let mut others = Vec::new();
    for user in users {
        if user.is_hireable() {
            hireable.push(value(user,),);
        } else {
            others.push(value(user,),);
        }
    }
    (hireable, others,)
}

fn indicator(flag: bool,) -> f64
{
    if flag { 1.0 } else { 0.0 }
}


#[cfg(test)]
mod tests
{
    use chrono::{TimeZone, Utc};

    use super::{
        fixtures::{repository, user},
        *,
    };
    use crate::stats::format_decimal;

    fn named(login: &str, name: &str,) -> UserRecord
    {
        UserRecord {
            name: Some(name.to_owned(),),
            ..user(login, 0,)
        }
    }

    #[test]
    fn followers_ranking_is_descending()
    {
        let users: Vec<UserRecord,> = [("a", 100,), ("b", 50,), ("c", 80,), ("d", 10,), ("e", 5,),]
            .iter()
            .map(|(login, followers,)| user(login, *followers,),)
            .collect();

        assert_eq!(top_followers(&users), vec!["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn followers_ties_keep_table_order_and_limit_to_five()
    {
        let users: Vec<UserRecord,> =
            ["f", "b", "z", "a", "c", "d",].iter().map(|login| user(login, 7,),).collect();

        assert_eq!(top_followers(&users), vec!["f", "b", "z", "a", "c"]);
        assert!(top_followers(&[]).is_empty());
    }

    #[test]
    fn earliest_users_sorted_by_signup()
    {
        let mut late = user("late", 0,);
        late.created_at = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0,).unwrap();
        let mut early = user("early", 0,);
        early.created_at = Utc.with_ymd_and_hms(2008, 4, 10, 0, 0, 0,).unwrap();

        assert_eq!(earliest_users(&[late, user("mid", 0), early]), vec!["early", "mid", "late"]);
    }

    #[test]
    fn licenses_skip_empty_values()
    {
        let repos = vec![
            repository("a", None, ""),
            repository("a", None, ""),
            repository("a", None, "mit"),
            repository("b", None, "apache-2.0"),
            repository("b", None, "mit"),
            repository("c", None, "gpl-3.0"),
            repository("c", None, "bsd-3-clause")
        ];

        assert_eq!(top_licenses(&repos), vec!["mit", "apache-2.0", "gpl-3.0"]);
    }

    #[test]
    fn company_counts_empty_values()
    {
        let mut users = vec![user("a", 0), user("b", 0), user("c", 0)];
        users[0].company = "ROCHE".to_owned();

        assert_eq!(most_common_company(&users).as_deref(), Some(""));
        assert_eq!(most_common_company(&[]), None);
    }

    #[test]
    fn language_ignores_missing_values()
    {
        let repos = vec![
            repository("a", None, ""),
            repository("a", None, ""),
            repository("a", Some("Python"), ""),
            repository("b", Some("Rust"), ""),
            repository("b", Some("Python"), "")
        ];

        assert_eq!(most_common_language(&repos).as_deref(), Some("Python"));
        assert_eq!(most_common_language(&[repository("a", None, "")]), None);
    }

    #[test]
    fn second_language_only_counts_recent_users()
    {
        let mut recent = user("recent", 0,);
        recent.created_at = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0,).unwrap();
        let mut boundary = user("boundary", 0,);
        boundary.created_at = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0,).unwrap();
        let users = vec![recent, boundary, user("veteran", 0)];
        let repos = vec![
            repository("recent", Some("Go"), ""),
            repository("recent", Some("Go"), ""),
            repository("recent", Some("Rust"), ""),
            repository("boundary", Some("Java"), ""),
            repository("boundary", Some("Java"), ""),
            repository("veteran", Some("C"), "")
        ];

        assert_eq!(second_language_after_2020(&users, &repos).as_deref(), Some("Rust"));
        assert_eq!(second_language_after_2020(&users, &repos[..2]), None);
    }

    #[test]
    fn average_stars_ties_pick_alphabetical_language()
    {
        let mut repos = vec![
            repository("a", Some("Zig"), ""),
            repository("a", Some("Ada"), ""),
            repository("a", Some("Go"), ""),
            repository("a", Some("Go"), "")
        ];
        repos[0].stargazers_count = 10;
        repos[1].stargazers_count = 10;
        repos[2].stargazers_count = 4;
        repos[3].stargazers_count = 30;

        assert_eq!(highest_average_stars_language(&repos).as_deref(), Some("Go"));
        repos[3].stargazers_count = 16;
        assert_eq!(highest_average_stars_language(&repos).as_deref(), Some("Ada"));
        assert_eq!(highest_average_stars_language(&[]), None);
    }

    #[test]
    fn leaders_weight_followers_by_following()
    {
        let mut users = vec![user("busy", 100), user("quiet", 30)];
        users[0].following = 9;

        assert_eq!(top_leaders(&users), vec!["quiet", "busy"]);
    }

    #[test]
    fn follower_statistics()
    {
        let mut users: Vec<UserRecord,> =
            [10, 20, 30,].iter().map(|followers| user("u", *followers,),).collect();
        for (user, repos,) in users.iter_mut().zip([1, 2, 3,],) {
            user.public_repos = repos;
        }

        assert_eq!(format_decimal(followers_repos_correlation(&users)), "1.000");
        assert_eq!(format_decimal(followers_per_repo_slope(&users)), "10.000");
        assert_eq!(format_decimal(followers_repos_correlation(&users[..1])), "nan");
    }

    #[test]
    fn projects_wiki_correlation_is_nan_without_variance()
    {
        let repos = vec![repository("a", None, ""), repository("b", None, "")];
        assert!(projects_wiki_correlation(&repos).is_nan());

        let mut mixed = repos;
        mixed[1].has_projects = false;
        mixed[1].has_wiki = false;
        assert_eq!(format_decimal(projects_wiki_correlation(&mixed)), "1.000");
    }

    #[test]
    fn hireable_differences()
    {
        let mut users = vec![user("a", 0), user("b", 0), user("c", 0)];
        users[0].hireable = "true".to_owned();
        users[0].following = 10;
        users[0].email = Some("a@example.com".to_owned(),);
        users[1].hireable = "false".to_owned();
        users[1].following = 2;
        users[1].email = Some(String::new(),);
        users[2].following = 4;
        users[2].email = Some("c@example.com".to_owned(),);

        assert_eq!(format_decimal(hireable_following_difference(&users)), "7.000");
        assert_eq!(format_decimal(hireable_email_difference(&users)), "0.500");
        assert_eq!(format_decimal(hireable_following_difference(&users[1..])), "nan");
    }

    #[test]
    fn bio_slope_ignores_empty_bios()
    {
        let mut users = vec![user("a", 10), user("b", 30), user("c", 1_000), user("d", 5)];
        users[0].bio = Some("one".to_owned(),);
        users[1].bio = Some("one two three".to_owned(),);
        users[2].bio = Some("   ".to_owned(),);

        assert_eq!(format_decimal(bio_length_slope(&users)), "10.000");
        assert_eq!(format_decimal(bio_length_slope(&users[2..])), "nan");
    }

    #[test]
    fn weekend_creators_tie_alphabetically()
    {
        let saturday = Utc.with_ymd_and_hms(2021, 3, 6, 23, 59, 0,).unwrap();
        let sunday = Utc.with_ymd_and_hms(2021, 3, 7, 0, 1, 0,).unwrap();
        let mut repos = vec![
            repository("zed", None, ""),
            repository("zed", None, ""),
            repository("amy", None, ""),
            repository("bob", None, ""),
            repository("bob", None, "")
        ];
        repos[0].created_at = saturday;
        repos[1].created_at = sunday;
        repos[3].created_at = saturday;
        repos[4].created_at = sunday;

        assert_eq!(top_weekend_creators(&repos), vec!["bob", "zed"]);
    }

    #[test]
    fn tied_surnames_are_alphabetical()
    {
        let users = vec![
            named("a", "Anna Muller"),
            named("b", "Ben Keller"),
            named("c", "Clara Muller"),
            named("d", "Dan Keller"),
            named("e", "Eve  Weber ")
        ];

        assert_eq!(most_common_surnames(&users), vec!["Keller", "Muller"]);
        assert!(most_common_surnames(&[user("x", 0)]).is_empty());
    }
}
