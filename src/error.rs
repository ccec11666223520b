#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the census crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the collectors, the reporter and the CLI.
///
/// Variants carry the failing path where one exists so that operators can
/// tell which table or settings file caused the problem. GitHub API failures
/// arrive as [`masterror::AppError`] and are folded into [`Error::Service`].
#[derive(Debug, masterror::Error,)]
pub enum Error
{
    /// Wraps I/O errors raised while reading or writing files.
    #[error("I/O failure at {path:?}: {source}")]
    Io {
        /// Location of the file being accessed.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Wraps YAML decoding errors of the settings file.
    #[error("failed to parse settings: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error,
    },
    /// Returned when settings or inputs violate invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String,
    },
    /// Wraps CSV encoding and decoding errors for a table file.
    #[error("failed to process table {path:?}: {source}")]
    Csv {
        /// Location of the table.
        path:   PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },
    /// Service errors when interacting with the GitHub API.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String,
    },
    /// The GitHub credential was rejected.
    #[error("authentication failed: {message}")]
    Unauthorized {
        /// Human readable message describing the rejection.
        message: String,
    },
}

impl Error
{
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Constructs an authentication error from the provided displayable value.
    pub fn unauthorized<M,>(message: M,) -> Self
    where
        M: Into<String,>,
    {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self,) -> String
    {
        format!("{self}")
    }
}

impl From<serde_yaml::Error,> for Error
{
    fn from(source: serde_yaml::Error,) -> Self
    {
        Self::Parse {
            source,
        }
    }
}

impl From<masterror::AppError,> for Error
{
    fn from(error: masterror::AppError,) -> Self
    {
        Self::Service {
            message: error.to_string(),
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
pub fn io_error(path: &Path, source: std::io::Error,) -> Error
{
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Creates an [`Error::Csv`] variant capturing the failing path and source.
pub fn csv_error(path: &Path, source: csv::Error,) -> Error
{
    Error::Csv {
        path: path.to_path_buf(),
        source,
    }
}
