use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::liftlog::tools::config::ensure_with_header;
use crate::liftlog::tools::error::{Result, ToolError};

/// Reads every row of a headered CSV file. A missing file reads as empty.
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let mut reader = csv::Reader::from_reader(file);
    let rows = reader.deserialize().collect::<csv::Result<Vec<T>>>()?;
    Ok(rows)
}

/// Appends one row to a headered CSV file, creating it with `columns` when it
/// does not exist. The row is flushed before returning.
pub fn append_row<T: Serialize>(path: &Path, columns: &[&str], row: &T) -> Result<()> {
    ensure_with_header(path, columns)?;
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|err| ToolError::storage_write(path, err))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    writer
        .serialize(row)
        .map_err(|err| ToolError::storage_write(path, err))?;
    writer
        .flush()
        .map_err(|err| ToolError::storage_write(path, err))?;
    Ok(())
}

/// Replaces the contents of `path` with `columns` followed by `rows`.
///
/// The rows are written to a temporary file next to `path` which is then
/// renamed over it, so readers see either the old or the new file.
pub fn rewrite<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staged = NamedTempFile::new_in(dir).map_err(|err| ToolError::storage_write(path, err))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(staged);
    writer
        .write_record(columns)
        .map_err(|err| ToolError::storage_write(path, err))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|err| ToolError::storage_write(path, err))?;
    }
    let mut staged = writer
        .into_inner()
        .map_err(|err| ToolError::storage_write(path, err.into_error()))?;
    staged
        .flush()
        .map_err(|err| ToolError::storage_write(path, err))?;
    staged
        .persist(path)
        .map_err(|err| ToolError::storage_write(path, err.error))?;
    Ok(())
}
