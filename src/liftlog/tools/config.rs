use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::liftlog::tools::error::{Result, ToolError};
use crate::liftlog::tools::model::{MOVEMENT_COLUMNS, SET_COLUMNS};

/// File name of the movement catalog inside a data directory.
pub const MOVEMENTS_FILE: &str = "movements.csv";
/// File name of the set log inside a data directory.
pub const WORKOUTS_FILE: &str = "workouts.csv";

/// Locations of the two backing files. Every store is constructed from one of
/// these, so tests can point a whole run at a temporary directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub movements: PathBuf,
    pub workouts: PathBuf,
}

impl StorePaths {
    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            movements: dir.join(MOVEMENTS_FILE),
            workouts: dir.join(WORKOUTS_FILE),
        }
    }

    /// Creates any missing backing file with its header row and returns the
    /// paths that were created.
    #[instrument(level = "debug", skip(self))]
    pub fn ensure_files(&self) -> Result<Vec<PathBuf>> {
        let mut created = Vec::new();
        if ensure_with_header(&self.movements, &MOVEMENT_COLUMNS)? {
            created.push(self.movements.clone());
        }
        if ensure_with_header(&self.workouts, &SET_COLUMNS)? {
            created.push(self.workouts.clone());
        }
        Ok(created)
    }
}

/// Writes `columns` as the header of `path` when the file does not exist yet
/// or is empty. Returns whether the header was written.
pub(crate) fn ensure_with_header(path: &Path, columns: &[&str]) -> Result<bool> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > 0 => return Ok(false),
        Ok(_) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(ToolError::storage_write(path, err)),
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ToolError::storage_write(path, err))?;
    }
    let mut writer =
        csv::Writer::from_path(path).map_err(|err| ToolError::storage_write(path, err))?;
    writer
        .write_record(columns)
        .and_then(|()| writer.flush().map_err(csv::Error::from))
        .map_err(|err| ToolError::storage_write(path, err))?;
    info!(path = %path.display(), "created backing file");
    Ok(true)
}
