// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CSV persistence for the users and repositories tables.
//!
//! Tables are written in full on every run; there is no append or update
//! mode. Column order follows the field order of the record types.

use std::{fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

use crate::{
    error::{self, Error},
    records::{REPOSITORY_COLUMNS, RepositoryRecord, USER_COLUMNS, UserRecord},
};

/// Overwrites `path` with a users table.
///
/// # Errors
///
/// Returns [`Error::Io`] when the parent directory cannot be created and
/// [`Error::Csv`] when the file cannot be written.
pub fn write_users(path: &Path, users: &[UserRecord],) -> Result<(), Error,>
{
    write_table(path, USER_COLUMNS, users,)?;
    info!("Wrote {} users to {}", users.len(), path.display());
    Ok((),)
}

/// Overwrites `path` with a repositories table.
///
/// # Errors
///
/// Returns [`Error::Io`] when the parent directory cannot be created and
/// [`Error::Csv`] when the file cannot be written.
pub fn write_repositories(path: &Path, repositories: &[RepositoryRecord],) -> Result<(), Error,>
{
    write_table(path, REPOSITORY_COLUMNS, repositories,)?;
    info!("Wrote {} repositories to {}", repositories.len(), path.display());
    Ok((),)
}

/// Reads a users table in row order.
///
/// # Errors
///
/// Returns [`Error::Csv`] when the file is missing or a row cannot be decoded.
pub fn read_users(path: &Path,) -> Result<Vec<UserRecord,>, Error,>
{
    read_table(path,)
}

/// Reads a repositories table in row order.
///
/// # Errors
///
/// Returns [`Error::Csv`] when the file is missing or a row cannot be decoded.
pub fn read_repositories(path: &Path,) -> Result<Vec<RepositoryRecord,>, Error,>
{
    read_table(path,)
}

/// Reads only the `login` column of a users table.
///
/// # Errors
///
/// Returns [`Error::Csv`] when the file cannot be read and
/// [`Error::Validation`] when the table has no `login` column.
pub fn read_logins(path: &Path,) -> Result<Vec<String,>, Error,>
{
    let mut reader =
        csv::Reader::from_path(path,).map_err(|source| error::csv_error(path, source,),)?;
    let headers = reader.headers().map_err(|source| error::csv_error(path, source,),)?;
    let column = headers.iter().position(|header| header == "login",).ok_or_else(|| {
        Error::validation(format!("{} has no login column", path.display()),)
    },)?;

    let mut logins = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|source| error::csv_error(path, source,),)?;
        if let Some(login,) = row.get(column,).filter(|value| !value.is_empty(),) {
            logins.push(login.to_owned(),);
        }
    }
    Ok(logins,)
}

/// Writes the header explicitly so that an empty table still has one.
fn write_table<T,>(path: &Path, columns: &[&str], rows: &[T],) -> Result<(), Error,>
where
    T: Serialize,
{
    if let Some(parent,) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent,).map_err(|source| error::io_error(parent, source,),)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false,)
        .from_path(path,)
        .map_err(|source| error::csv_error(path, source,),)?;
    writer.write_record(columns,).map_err(|source| error::csv_error(path, source,),)?;
    for row in rows {
        writer.serialize(row,).map_err(|source| error::csv_error(path, source,),)?;
    }
    writer.flush().map_err(|source| error::io_error(path, source,),)?;
    Ok((),)
}

fn read_table<T,>(path: &Path,) -> Result<Vec<T,>, Error,>
where
    T: DeserializeOwned,
{
    let mut reader =
        csv::Reader::from_path(path,).map_err(|source| error::csv_error(path, source,),)?;
    reader
        .deserialize()
        .map(|row| row.map_err(|source| error::csv_error(path, source,),),)
        .collect()
}
