use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, instrument};

use crate::liftlog::tools::error::Result;
use crate::liftlog::tools::io::csv_file;
use crate::liftlog::tools::model::{SET_COLUMNS, SetRecord};

/// Append-only log of performed sets. Rows are never rewritten or removed and
/// no checks are made against the catalog.
#[derive(Debug, Clone)]
pub struct SetLog {
    path: PathBuf,
}

impl SetLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one set, stamping `created_at` with the local time when unset.
    /// Returns the record as written.
    #[instrument(
        level = "info",
        skip_all,
        fields(workout_id = %record.workout_id, movement_id = %record.movement_id)
    )]
    pub fn append(&self, mut record: SetRecord) -> Result<SetRecord> {
        if record.created_at.is_none() {
            record.created_at = Some(Local::now().naive_local());
        }
        csv_file::append_row(&self.path, &SET_COLUMNS, &record)?;
        info!(set_number = record.set_number, "appended set");
        Ok(record)
    }

    /// Reads every set in log order. A missing file reads as empty.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn scan(&self) -> Result<Vec<SetRecord>> {
        let records: Vec<SetRecord> = csv_file::read_rows(&self.path)?;
        debug!(set_count = records.len(), "scanned set log");
        Ok(records)
    }
}
