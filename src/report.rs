// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Plain-text analysis report.

use std::{fmt, fs, path::Path};

use tracing::info;

use crate::{
    analysis,
    error::{self, Error},
    records::{RepositoryRecord, UserRecord},
    stats::format_decimal,
    table,
};

/// Answer to a single report question.
#[derive(Debug, Clone, PartialEq,)]
pub enum Answer
{
    /// Ranked values, rendered comma-separated.
    List(Vec<String,>,),
    /// Single value, rendered as `NONE` when absent.
    Scalar(Option<String,>,),
    /// Statistic, rendered with three decimals.
    Number(f64,),
}

impl fmt::Display for Answer
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        match self {
            Self::List(values,) => f.write_str(&values.join(",",),),
            Self::Scalar(Some(value,),) => f.write_str(value,),
            Self::Scalar(None,) => f.write_str("NONE",),
            Self::Number(value,) => f.write_str(&format_decimal(*value,),),
        }
    }
}

/// A numbered question and its answer.
#[derive(Debug, Clone, PartialEq,)]
pub struct Section
{
    pub title:  &'static str,
    pub answer: Answer,
}

/// All sixteen answers for one location.
#[derive(Debug, Clone, PartialEq,)]
pub struct Report
{
    pub location: String,
    pub sections: Vec<Section,>,
}

impl Report
{
    /// Evaluates every query over the loaded tables.
    pub fn build(location: &str, users: &[UserRecord], repositories: &[RepositoryRecord],) -> Self
    {
        use Answer::{List, Number, Scalar};

        let answers = [
            ("Top 5 users by followers", List(analysis::top_followers(users,),),),
            ("5 earliest registered users", List(analysis::earliest_users(users,),),),
            ("Top 3 licenses", List(analysis::top_licenses(repositories,),),),
            ("Most common company", Scalar(analysis::most_common_company(users,),),),
            ("Most popular language", Scalar(analysis::most_common_language(repositories,),),),
            (
                "Second most popular language for users after 2020",
                Scalar(analysis::second_language_after_2020(users, repositories,),),
            ),
            (
                "Language with highest average stars",
                Scalar(analysis::highest_average_stars_language(repositories,),),
            ),
            ("Top 5 users by leader strength", List(analysis::top_leaders(users,),),),
            (
                "Correlation between followers and public repos",
                Number(analysis::followers_repos_correlation(users,),),
            ),
            (
                "Additional followers per public repository",
                Number(analysis::followers_per_repo_slope(users,),),
            ),
            (
                "Correlation between projects and wiki enabled",
                Number(analysis::projects_wiki_correlation(repositories,),),
            ),
            (
                "Difference in following count for hireable users",
                Number(analysis::hireable_following_difference(users,),),
            ),
            ("Impact of bio length on followers", Number(analysis::bio_length_slope(users,),),),
            (
                "Top 5 weekend repository creators",
                List(analysis::top_weekend_creators(repositories,),),
            ),
            (
                "Difference in email sharing for hireable users",
                Number(analysis::hireable_email_difference(users,),),
            ),
            ("Most common surname(s)", List(analysis::most_common_surnames(users,),),),
        ];

        Self {
            location: location.to_owned(),
            sections: answers
                .into_iter()
                .map(|(title, answer,)| Section {
                    title,
                    answer,
                },)
                .collect(),
        }
    }

    /// Renders the report text, ending with a newline.
    pub fn render(&self,) -> String
    {
        let mut out = format!("{} GitHub Users Analysis\n", self.location);
        for (index, section,) in self.sections.iter().enumerate() {
            out.push_str(&format!("\n{}. {}:\n{}\n", index + 1, section.title, section.answer),);
        }
        out
    }
}

/// Overwrites `path` with the rendered report.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file or its parent directory cannot be
/// written.
pub fn write_report(path: &Path, report: &Report,) -> Result<(), Error,>
{
    if let Some(parent,) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent,).map_err(|source| error::io_error(parent, source,),)?;
    }
    fs::write(path, report.render(),).map_err(|source| error::io_error(path, source,),)?;
    info!("Analysis written to {}", path.display());
    Ok((),)
}

/// Loads both tables, builds the report and writes it.
///
/// # Errors
///
/// Propagates table read failures and report write failures.
pub fn generate_report(
    location: &str,
    users_path: &Path,
    repositories_path: &Path,
    report_path: &Path,
) -> Result<Report, Error,>
{
    let users = table::read_users(users_path,)?;
    let repositories = table::read_repositories(repositories_path,)?;
    info!("Analysing {} users and {} repositories", users.len(), repositories.len());

    let report = Report::build(location, &users, &repositories,);
    write_report(report_path, &report,)?;
    Ok(report,)
}
