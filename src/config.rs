// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Settings shared by the collectors and the reporter.
//!
//! Settings are read from an optional YAML document whose keys are all
//! optional, then overlaid with command-line overrides and validated into a
//! [`Settings`] value whose fields satisfy the collector invariants.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{self, Error};

const DEFAULT_LOCATION: &str = "Basel";
const DEFAULT_MIN_FOLLOWERS: u32 = 10;
/// Largest page size accepted by the GitHub REST API.
pub const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_MAX_REPOSITORIES: usize = 500;
const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
const DEFAULT_USERS_PATH: &str = "users.csv";
const DEFAULT_REPOSITORIES_PATH: &str = "repositories.csv";
const DEFAULT_REPORT_PATH: &str = "analysis.txt";

/// Raw settings document as written by operators.
///
/// # Examples
///
/// ```
/// use ghcensus::SettingsFile;
///
/// let yaml = r#"
/// location: Zurich
/// min_followers: 50
/// "#;
/// let file: SettingsFile = serde_yaml::from_str(yaml,).expect("valid settings",);
/// assert_eq!(file.location.as_deref(), Some("Zurich"));
/// assert!(file.page_size.is_none());
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq,)]
pub struct SettingsFile
{
    /// City matched against the profile location.
    #[serde(default, alias = "city")]
    pub location: Option<String,>,

    /// Location strings submitted to the search endpoint.
    #[serde(default, alias = "search-locations", alias = "searchLocations")]
    pub search_locations: Option<Vec<String,>,>,

    /// Exclusive lower bound on the follower count of searched users.
    #[serde(default, alias = "min-followers")]
    pub min_followers: Option<u32,>,

    /// Items requested per page.
    #[serde(default, alias = "per_page")]
    pub page_size: Option<u32,>,

    /// Upper bound on repositories collected per user.
    #[serde(default, alias = "max-repositories", alias = "max_repos")]
    pub max_repositories: Option<usize,>,

    /// Fixed pause inserted between sequential requests.
    #[serde(default)]
    pub request_delay_ms: Option<u64,>,

    #[serde(default)]
    pub users_path: Option<PathBuf,>,

    #[serde(default)]
    pub repositories_path: Option<PathBuf,>,

    #[serde(default)]
    pub report_path: Option<PathBuf,>,
}

impl SettingsFile
{
    /// Loads a settings document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and
    /// [`Error::Parse`] when the YAML cannot be decoded.
    pub fn load(path: &Path,) -> Result<Self, Error,>
    {
        let contents =
            fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
        Self::parse(&contents,)
    }

    /// Parses a settings document. An empty document yields all defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the YAML cannot be decoded.
    pub fn parse(contents: &str,) -> Result<Self, Error,>
    {
        if contents.trim().is_empty() {
            return Ok(Self::default(),);
        }
        Ok(serde_yaml::from_str(contents,)?,)
    }

    /// Applies non-empty values from `overrides` on top of `self`.
    #[must_use]
    pub fn overlay(self, overrides: Self,) -> Self
    {
        Self {
            location:          overrides.location.or(self.location,),
            search_locations:  overrides.search_locations.or(self.search_locations,),
            min_followers:     overrides.min_followers.or(self.min_followers,),
            page_size:         overrides.page_size.or(self.page_size,),
            max_repositories:  overrides.max_repositories.or(self.max_repositories,),
            request_delay_ms:  overrides.request_delay_ms.or(self.request_delay_ms,),
            users_path:        overrides.users_path.or(self.users_path,),
            repositories_path: overrides.repositories_path.or(self.repositories_path,),
            report_path:       overrides.report_path.or(self.report_path,),
        }
    }

    /// Validates the document and fills in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the location is blank, a search
    /// location is blank, the page size is outside `1..=100`, or the
    /// repository cap is zero.
    pub fn resolve(self,) -> Result<Settings, Error,>
    {
        let location = normalize_location(self.location.as_deref().unwrap_or(DEFAULT_LOCATION,),)?;

        let search_locations = match self.search_locations {
            Some(values,) if !values.is_empty() => values
                .iter()
                .map(|value| normalize_location(value,),)
                .collect::<Result<Vec<_,>, _,>>()?,
            _ => vec![location.clone()],
        };

        let page_size = self.page_size.unwrap_or(MAX_PAGE_SIZE,);
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::validation(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            ),),);
        }

        let max_repositories = self.max_repositories.unwrap_or(DEFAULT_MAX_REPOSITORIES,);
        if max_repositories == 0 {
            return Err(Error::validation("max_repositories must be at least 1",),);
        }

        Ok(Settings {
            location,
            search_locations,
            min_followers: self.min_followers.unwrap_or(DEFAULT_MIN_FOLLOWERS,),
            page_size,
            max_repositories,
            request_delay: Duration::from_millis(
                self.request_delay_ms.unwrap_or(DEFAULT_REQUEST_DELAY_MS,),
            ),
            users_path: self.users_path.unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_PATH,),),
            repositories_path: self
                .repositories_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPOSITORIES_PATH,),),
            report_path: self.report_path.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH,),),
        },)
    }
}

/// Validated settings consumed by the collectors and the reporter.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Settings
{
    /// City matched case-insensitively against profile locations.
    pub location:          String,
    /// Location strings submitted to the search endpoint, in order.
    pub search_locations:  Vec<String,>,
    /// Searched users must have strictly more followers than this.
    pub min_followers:     u32,
    /// Items requested per page, within `1..=100`.
    pub page_size:         u32,
    /// Upper bound on repositories collected per user, at least 1.
    pub max_repositories:  usize,
    /// Pause inserted between sequential requests.
    pub request_delay:     Duration,
    pub users_path:        PathBuf,
    pub repositories_path: PathBuf,
    pub report_path:       PathBuf,
}

impl Default for Settings
{
    fn default() -> Self
    {
        Self {
            location:          DEFAULT_LOCATION.to_owned(),
            search_locations:  vec![DEFAULT_LOCATION.to_owned()],
            min_followers:     DEFAULT_MIN_FOLLOWERS,
            page_size:         MAX_PAGE_SIZE,
            max_repositories:  DEFAULT_MAX_REPOSITORIES,
            request_delay:     Duration::from_millis(DEFAULT_REQUEST_DELAY_MS,),
            users_path:        PathBuf::from(DEFAULT_USERS_PATH,),
            repositories_path: PathBuf::from(DEFAULT_REPOSITORIES_PATH,),
            report_path:       PathBuf::from(DEFAULT_REPORT_PATH,),
        }
    }
}

fn normalize_location(input: &str,) -> Result<String, Error,>
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("location cannot be empty",),);
    }
    Ok(trimmed.to_owned(),)
}

#[cfg(test)]
mod tests
{
    use std::{path::PathBuf, time::Duration};

    use tempfile::tempdir;

    use super::{Settings, SettingsFile};
    use crate::Error;

    #[test]
    fn empty_document_resolves_to_defaults()
    {
        let settings = SettingsFile::parse("",)
            .expect("empty document should parse",)
            .resolve()
            .expect("defaults should validate",);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn parses_all_keys()
    {
        let yaml = r"
location: Zurich
search_locations: [Zurich, Zürich]
min_followers: 50
page_size: 30
max_repositories: 40
request_delay_ms: 0
users_path: out/users.csv
repositories_path: out/repos.csv
report_path: out/report.txt
";
        let settings = SettingsFile::parse(yaml,)
            .expect("valid yaml",)
            .resolve()
            .expect("valid settings",);

        assert_eq!(settings.location, "Zurich");
        assert_eq!(settings.search_locations, vec!["Zurich".to_owned(), "Zürich".to_owned()]);
        assert_eq!(settings.min_followers, 50);
        assert_eq!(settings.page_size, 30);
        assert_eq!(settings.max_repositories, 40);
        assert_eq!(settings.request_delay, Duration::ZERO);
        assert_eq!(settings.users_path, PathBuf::from("out/users.csv"));
        assert_eq!(settings.repositories_path, PathBuf::from("out/repos.csv"));
        assert_eq!(settings.report_path, PathBuf::from("out/report.txt"));
    }

    #[test]
    fn search_locations_default_to_location()
    {
        let settings = SettingsFile {
            location: Some("  Geneva ".to_owned(),),
            ..SettingsFile::default()
        }
        .resolve()
        .expect("valid settings",);
        assert_eq!(settings.location, "Geneva");
        assert_eq!(settings.search_locations, vec!["Geneva".to_owned()]);
    }

    #[test]
    fn overlay_prefers_overrides()
    {
        let base = SettingsFile {
            location: Some("Basel".to_owned(),),
            min_followers: Some(10,),
            ..SettingsFile::default()
        };
        let overrides = SettingsFile {
            min_followers: Some(100,),
            ..SettingsFile::default()
        };
        let merged = base.overlay(overrides,);
        assert_eq!(merged.location.as_deref(), Some("Basel"));
        assert_eq!(merged.min_followers, Some(100));
    }

    #[test]
    fn rejects_out_of_range_page_size()
    {
        for page_size in [0, 101,] {
            let error = SettingsFile {
                page_size: Some(page_size,),
                ..SettingsFile::default()
            }
            .resolve()
            .expect_err("page size should be rejected",);
            assert!(matches!(error, Error::Validation { .. }));
        }
    }

    #[test]
    fn rejects_zero_repository_cap()
    {
        let error = SettingsFile {
            max_repositories: Some(0,),
            ..SettingsFile::default()
        }
        .resolve()
        .expect_err("cap should be rejected",);
        match error {
            Error::Validation {
                message,
            } => assert_eq!(message, "max_repositories must be at least 1"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_location()
    {
        let error = SettingsFile {
            location: Some("   ".to_owned(),),
            ..SettingsFile::default()
        }
        .resolve()
        .expect_err("blank location should be rejected",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn load_reports_missing_file()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let error = SettingsFile::load(&temp.path().join("missing.yaml",),)
            .expect_err("missing file should fail",);
        assert!(matches!(error, Error::Io { .. }));
    }

    #[test]
    fn load_reports_invalid_yaml()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let path = temp.path().join("settings.yaml",);
        std::fs::write(&path, "location: [unclosed",).expect("failed to write settings",);
        let error = SettingsFile::load(&path,).expect_err("invalid yaml should fail",);
        assert!(matches!(error, Error::Parse { .. }));
    }
}
