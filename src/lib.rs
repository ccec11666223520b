//! Census of the GitHub users living in a city.
//!
//! The library collects the users of a location through the GitHub search
//! API, gathers their most recently pushed repositories, persists both as
//! CSV tables and answers a fixed set of descriptive questions over them.
//! Requests are issued strictly sequentially with a fixed pause between
//! them; a failed request ends only the pagination loop it belongs to.

mod analysis;
mod client;
mod config;
mod credentials;
mod error;
mod pacing;
mod pagination;
mod progress;
mod records;
mod report;
mod repositories;
mod stats;
mod table;
mod users;

pub use analysis::{
    bio_length_slope, earliest_users, followers_per_repo_slope, followers_repos_correlation,
    hireable_email_difference, hireable_following_difference, highest_average_stars_language,
    most_common_company, most_common_language, most_common_surnames, projects_wiki_correlation,
    second_language_after_2020, top_followers, top_leaders, top_licenses, top_weekend_creators,
};
pub use client::{GitHubApi, OctocrabClient, RepositoryPayload, SearchHit, SearchPage, UserProfile};
pub use config::{MAX_PAGE_SIZE, Settings, SettingsFile};
pub use credentials::{Token, validate_token, verify_token};
pub use error::{Error, csv_error, io_error};
pub use pacing::Pacer;
pub use pagination::{PageCursor, PageStep};
pub use records::{
    HIREABLE, REPOSITORY_COLUMNS, RepositoryRecord, USER_COLUMNS, UserRecord, license_key,
    normalize_company,
};
pub use report::{Answer, Report, Section, generate_report, write_report};
pub use repositories::{collect_all_repositories, collect_repositories, logins_of};
pub use stats::{format_decimal, mean, ols_slope, pearson};
pub use table::{read_logins, read_repositories, read_users, write_repositories, write_users};
pub use users::{collect_users, location_matches, search_query};
