//! Operations behind the CLI subcommands.
//!
//! Each function takes the [`StorePaths`] of the data directory, builds the
//! stores it needs and returns structured results; printing is left to the
//! binary.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::liftlog::tools::catalog::{Catalog, CatalogStore};
use crate::liftlog::tools::config::StorePaths;
use crate::liftlog::tools::error::{Result, ToolError, UnknownSetType};
use crate::liftlog::tools::import;
use crate::liftlog::tools::log::SetLog;
use crate::liftlog::tools::model::{DEFAULT_SET_TYPE, Movement, SetRecord, check_set_type};
use crate::liftlog::tools::slug;
use crate::liftlog::tools::summary;

const WORKOUT_ID_LEN: usize = 8;
const START_TIME_FORMAT: &str = "%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Creates any missing backing file and returns the ones created.
pub fn init(paths: &StorePaths) -> Result<Vec<PathBuf>> {
    paths.ensure_files()
}

/// Loads the full catalog.
pub fn list_movements(paths: &StorePaths) -> Result<Catalog> {
    CatalogStore::new(&paths.movements).load_all()
}

/// Searches the catalog by name or id substring.
pub fn find_movements(paths: &StorePaths, query: &str) -> Result<Vec<Movement>> {
    CatalogStore::new(&paths.movements).find(query)
}

/// Imports movements from an external TSV, CSV or `.xlsx` file.
pub fn import_movements(paths: &StorePaths, source: &Path) -> Result<usize> {
    import::import_from(source, &CatalogStore::new(&paths.movements))
}

/// Writes the per-workout summary of the set log to `out`.
pub fn export_summary(paths: &StorePaths, out: &Path) -> Result<usize> {
    summary::export_summary(&SetLog::new(&paths.workouts), out)
}

/// Fields supplied when adding a movement by hand.
#[derive(Debug, Clone, Default)]
pub struct MovementDraft {
    /// Explicit id. When absent the id is derived from the name.
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub default_unit: String,
    pub primary_muscle: String,
    pub secondary_muscles: String,
    pub notes: String,
}

/// Adds a movement to the catalog.
///
/// An explicit id is used verbatim and fails with
/// [`ToolError::DuplicateIdentifier`] when taken; a derived id gets a numeric
/// suffix until it is unique.
#[instrument(level = "info", skip_all, fields(name = %draft.name))]
pub fn add_movement(paths: &StorePaths, draft: MovementDraft) -> Result<Movement> {
    let store = CatalogStore::new(&paths.movements);
    let id = match draft.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => slug::resolve_unique(&draft.name, &store.load_all()?.ids()),
    };
    let movement = Movement {
        id,
        name: draft.name,
        category: draft.category,
        default_unit: draft.default_unit,
        primary_muscle: draft.primary_muscle,
        secondary_muscles: draft.secondary_muscles,
        notes: draft.notes,
    };
    store.append(&movement)?;
    Ok(movement)
}

/// Fields supplied when logging a single set. Unset fields fall back to the
/// defaults documented on [`add_set`].
#[derive(Debug, Clone, Default)]
pub struct SetDraft {
    pub workout_id: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub movement_id: Option<String>,
    pub movement_name: Option<String>,
    pub set_number: u32,
    pub set_type: Option<String>,
    pub cluster_id: Option<String>,
    pub reps: Option<String>,
    pub load: Option<f64>,
    pub unit: Option<String>,
    pub rest_seconds: Option<u32>,
    pub rpe: Option<f64>,
    pub tags: Option<String>,
    pub notes: Option<String>,
}

/// Result of logging a set.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSet {
    /// The row as appended to the log.
    pub record: SetRecord,
    /// Movement created because the set named one the catalog did not hold.
    pub created_movement: Option<Movement>,
    /// Present when the set type is outside the known vocabulary.
    pub warning: Option<UnknownSetType>,
}

/// Logs one set at the current local time. See [`add_set_at`].
pub fn add_set(paths: &StorePaths, draft: SetDraft) -> Result<LoggedSet> {
    add_set_at(paths, draft, Local::now().naive_local())
}

/// Logs one set, treating `now` as the current time.
///
/// The movement is resolved by id, then by name ignoring case. A name that
/// matches nothing creates a new movement first. Defaults: an eight character
/// random workout id, `now`'s date and time, set type `work` and the
/// movement's default unit.
#[instrument(level = "info", skip(paths, draft), fields(set_number = draft.set_number))]
pub fn add_set_at(paths: &StorePaths, draft: SetDraft, now: NaiveDateTime) -> Result<LoggedSet> {
    let catalog = CatalogStore::new(&paths.movements);
    let (movement, created_movement) = resolve_by_id_or_name(
        &catalog,
        draft.movement_id.as_deref(),
        draft.movement_name.as_deref(),
    )?;

    let set_type = draft
        .set_type
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_SET_TYPE.to_string());
    let warning = set_type_warning(&set_type);

    let mut record = SetRecord::new(
        draft.workout_id.unwrap_or_else(new_workout_id),
        draft
            .date
            .unwrap_or_else(|| now.format(DATE_FORMAT).to_string()),
        draft
            .start_time
            .unwrap_or_else(|| now.format(START_TIME_FORMAT).to_string()),
        &movement,
        draft.set_number,
    );
    record.set_type = set_type;
    record.cluster_id = draft.cluster_id.filter(|value| !value.is_empty());
    record.reps = draft.reps.unwrap_or_default();
    record.load = draft.load;
    record.unit = draft
        .unit
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| movement.default_unit.clone());
    record.rest_seconds = draft.rest_seconds;
    record.rpe = draft.rpe;
    record.tags = draft.tags.unwrap_or_default();
    record.notes = draft.notes.unwrap_or_default();
    record.created_at = Some(now);

    let record = SetLog::new(&paths.workouts).append(record)?;
    Ok(LoggedSet {
        record,
        created_movement,
        warning,
    })
}

/// Generates the short random id used for new workouts.
pub fn new_workout_id() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(WORKOUT_ID_LEN)
        .collect()
}

fn resolve_by_id_or_name(
    catalog: &CatalogStore,
    movement_id: Option<&str>,
    movement_name: Option<&str>,
) -> Result<(Movement, Option<Movement>)> {
    let snapshot = catalog.load_all()?;
    if let Some(found) = movement_id.and_then(|id| snapshot.get(id)) {
        return Ok((found.clone(), None));
    }
    let Some(name) = movement_name.map(str::trim).filter(|name| !name.is_empty()) else {
        return Err(ToolError::MovementNotFound);
    };
    if let Some(found) = snapshot.find_by_name(name) {
        return Ok((found.clone(), None));
    }
    let created = create_named(catalog, &snapshot, name)?;
    Ok((created.clone(), Some(created)))
}

fn create_named(catalog: &CatalogStore, snapshot: &Catalog, name: &str) -> Result<Movement> {
    let movement = Movement::new(slug::resolve_unique(name, &snapshot.ids()), name);
    catalog.append(&movement)?;
    info!(id = %movement.id, "auto-created movement");
    Ok(movement)
}

fn set_type_warning(set_type: &str) -> Option<UnknownSetType> {
    let warning = check_set_type(set_type).err();
    if let Some(unknown) = &warning {
        warn!(set_type = %unknown.0, "unknown set type");
    }
    warning
}

/// One set entered during an interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionEntry {
    /// Name or id fragment of the movement.
    pub movement: String,
    pub reps: String,
    pub load: Option<f64>,
    /// Falls back to the movement's default unit when absent.
    pub unit: Option<String>,
    /// Falls back to `work` when absent.
    pub set_type: Option<String>,
}

/// An interactive logging session. All sets share the workout id, date and
/// start time; set numbers count up from 1 across the whole session.
#[derive(Debug, Clone)]
pub struct Session {
    paths: StorePaths,
    workout_id: String,
    date: String,
    start_time: String,
    next_set: u32,
}

impl Session {
    /// Starts a session at the current local time, creating the backing files
    /// if needed.
    pub fn start(
        paths: &StorePaths,
        workout_id: Option<String>,
        date: Option<String>,
    ) -> Result<Self> {
        Self::start_at(paths, workout_id, date, Local::now().naive_local())
    }

    /// Starts a session treating `now` as the current time.
    pub fn start_at(
        paths: &StorePaths,
        workout_id: Option<String>,
        date: Option<String>,
        now: NaiveDateTime,
    ) -> Result<Self> {
        paths.ensure_files()?;
        let session = Self {
            paths: paths.clone(),
            workout_id: workout_id.unwrap_or_else(new_workout_id),
            date: date.unwrap_or_else(|| now.format(DATE_FORMAT).to_string()),
            start_time: now.format(START_TIME_FORMAT).to_string(),
            next_set: 1,
        };
        info!(workout_id = %session.workout_id, date = %session.date, "started session");
        Ok(session)
    }

    pub fn workout_id(&self) -> &str {
        &self.workout_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Number the next logged set will carry.
    pub fn next_set(&self) -> u32 {
        self.next_set
    }

    /// Logs one set. The movement is the first search match for the trimmed
    /// `entry.movement`; when nothing matches a new movement is created. A
    /// blank movement fails with [`ToolError::MovementNotFound`].
    #[instrument(
        level = "info",
        skip_all,
        fields(workout_id = %self.workout_id, set_number = self.next_set)
    )]
    pub fn log_set(&mut self, entry: SessionEntry) -> Result<LoggedSet> {
        let name = entry.movement.trim();
        if name.is_empty() {
            return Err(ToolError::MovementNotFound);
        }
        let catalog = CatalogStore::new(&self.paths.movements);
        let snapshot = catalog.load_all()?;
        let first_match = snapshot.search(name).into_iter().next();
        let (movement, created_movement) = match first_match {
            Some(found) => (found, None),
            None => {
                let created = create_named(&catalog, &snapshot, name)?;
                (created.clone(), Some(created))
            }
        };

        let set_type = entry
            .set_type
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SET_TYPE.to_string());
        let warning = set_type_warning(&set_type);

        let mut record = SetRecord::new(
            self.workout_id.clone(),
            self.date.clone(),
            self.start_time.clone(),
            &movement,
            self.next_set,
        );
        record.set_type = set_type;
        record.reps = entry.reps;
        record.load = entry.load;
        record.unit = entry
            .unit
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| movement.default_unit.clone());

        let record = SetLog::new(&self.paths.workouts).append(record)?;
        self.next_set += 1;
        Ok(LoggedSet {
            record,
            created_movement,
            warning,
        })
    }
}
