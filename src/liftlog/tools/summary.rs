use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument};

use crate::liftlog::tools::error::{Result, ToolError};
use crate::liftlog::tools::io::excel_write;
use crate::liftlog::tools::log::SetLog;
use crate::liftlog::tools::model::SetRecord;

/// Column order of the summary export.
pub const SUMMARY_COLUMNS: [&str; 3] = ["workout_id", "date", "movements_summary"];

/// Separator placed between set descriptors in `movements_summary`.
pub const DESCRIPTOR_SEPARATOR: &str = ";";

const SUMMARY_SHEET: &str = "Summary";

/// Rollup of the sets sharing one workout id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSummary {
    pub workout_id: String,
    /// Date of the first set seen for the workout.
    pub date: String,
    /// One [`SetRecord::descriptor`] per set, in log order.
    pub sets: Vec<String>,
}

impl WorkoutSummary {
    /// Descriptors joined with [`DESCRIPTOR_SEPARATOR`].
    pub fn movements_summary(&self) -> String {
        self.sets.join(DESCRIPTOR_SEPARATOR)
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.workout_id.clone(),
            self.date.clone(),
            self.movements_summary(),
        ]
    }
}

/// Groups sets by workout id in a single pass. Workouts come out in the order
/// their ids were first seen.
pub fn summarize<I>(records: I) -> Vec<WorkoutSummary>
where
    I: IntoIterator<Item = SetRecord>,
{
    let mut summaries: Vec<WorkoutSummary> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records {
        let descriptor = record.descriptor();
        match positions.get(&record.workout_id) {
            Some(&position) => summaries[position].sets.push(descriptor),
            None => {
                positions.insert(record.workout_id.clone(), summaries.len());
                summaries.push(WorkoutSummary {
                    workout_id: record.workout_id,
                    date: record.date,
                    sets: vec![descriptor],
                });
            }
        }
    }

    summaries
}

/// Summarises the whole set log into `out` and returns the number of
/// workouts written. Nothing is written when the log file does not exist.
/// Paths ending in `.xlsx` are written as a workbook, anything else as CSV.
#[instrument(
    level = "info",
    skip_all,
    fields(log = %log.path().display(), output = %out.display())
)]
pub fn export_summary(log: &SetLog, out: &Path) -> Result<usize> {
    if !log.path().exists() {
        return Ok(0);
    }
    let summaries = summarize(log.scan()?);
    write_summaries(out, &summaries)?;
    info!(workout_count = summaries.len(), "exported summary");
    Ok(summaries.len())
}

/// Writes summaries to `out` in the format implied by its extension.
pub fn write_summaries(out: &Path, summaries: &[WorkoutSummary]) -> Result<()> {
    let rows: Vec<Vec<String>> = summaries.iter().map(WorkoutSummary::to_row).collect();
    let is_workbook = out
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        return excel_write::write_table(out, SUMMARY_SHEET, &SUMMARY_COLUMNS, &rows);
    }

    let mut writer = csv::Writer::from_path(out).map_err(|err| ToolError::storage_write(out, err))?;
    writer
        .write_record(SUMMARY_COLUMNS)
        .map_err(|err| ToolError::storage_write(out, err))?;
    for row in &rows {
        writer
            .write_record(row)
            .map_err(|err| ToolError::storage_write(out, err))?;
    }
    writer
        .flush()
        .map_err(|err| ToolError::storage_write(out, err))?;
    Ok(())
}
