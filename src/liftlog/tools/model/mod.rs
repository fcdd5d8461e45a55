use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::liftlog::tools::error::UnknownSetType;

/// Identifier assigned to a movement. It is derived from the movement name by
/// [`slug::normalize`](crate::liftlog::tools::slug::normalize) and never
/// changes once written to the catalog.
pub type MovementId = String;

/// Column order of the movement catalog file.
pub const MOVEMENT_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "category",
    "default_unit",
    "primary_muscle",
    "secondary_muscles",
    "notes",
];

/// Column order of the set log file.
pub const SET_COLUMNS: [&str; 16] = [
    "workout_id",
    "date",
    "start_time",
    "movement_id",
    "movement_name",
    "set_number",
    "set_type",
    "cluster_id",
    "reps",
    "load",
    "unit",
    "rest_seconds",
    "rpe",
    "tags",
    "notes",
    "created_at",
];

/// Set type written when the caller does not provide one.
pub const DEFAULT_SET_TYPE: &str = "work";

/// Set types the CLI recognises. Anything else is accepted with a warning.
pub const SET_TYPE_CHOICES: [&str; 12] = [
    "warmup",
    "ramp",
    "work",
    "heavy",
    "drop",
    "backoff",
    "amrap",
    "superset",
    "rest-pause",
    "failure",
    "accessory",
    "bilbo",
];

/// Checks a set type against [`SET_TYPE_CHOICES`].
pub fn check_set_type(set_type: &str) -> Result<(), UnknownSetType> {
    if SET_TYPE_CHOICES.contains(&set_type) {
        Ok(())
    } else {
        Err(UnknownSetType(set_type.to_string()))
    }
}

/// A named exercise in the catalog. Field order matches [`MOVEMENT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Movement {
    /// Unique catalog identifier. Rows with an empty id are re-keyed from the
    /// name when the catalog is loaded.
    #[serde(default)]
    pub id: MovementId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub default_unit: String,
    #[serde(default)]
    pub primary_muscle: String,
    /// Semicolon separated list of muscles.
    #[serde(default)]
    pub secondary_muscles: String,
    #[serde(default)]
    pub notes: String,
}

impl Movement {
    /// Creates a movement carrying only an id and a name.
    pub fn new(id: impl Into<MovementId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the category of the movement.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Case-insensitive exact comparison against the movement name.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One performed set. Field order matches [`SET_COLUMNS`].
///
/// Empty cells decode to `None` for the optional fields. `created_at` is
/// resolved once, by [`SetLog::append`](crate::liftlog::tools::log::SetLog::append),
/// which stamps the current local time when it is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub workout_id: String,
    pub date: String,
    pub start_time: String,
    pub movement_id: MovementId,
    /// Copy of the movement name at the time the set was logged.
    pub movement_name: String,
    pub set_number: u32,
    #[serde(default)]
    pub set_type: String,
    #[serde(default)]
    pub cluster_id: Option<String>,
    /// Free-form so values such as `AMRAP` survive.
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub load: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub rpe: Option<f64>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl SetRecord {
    /// Creates a `work` set with every optional field empty.
    pub fn new(
        workout_id: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        movement: &Movement,
        set_number: u32,
    ) -> Self {
        Self {
            workout_id: workout_id.into(),
            date: date.into(),
            start_time: start_time.into(),
            movement_id: movement.id.clone(),
            movement_name: movement.name.clone(),
            set_number,
            set_type: DEFAULT_SET_TYPE.to_string(),
            cluster_id: None,
            reps: String::new(),
            load: None,
            unit: String::new(),
            rest_seconds: None,
            rpe: None,
            tags: String::new(),
            notes: String::new(),
            created_at: None,
        }
    }

    /// Renders the set as `<movement_name>:<set_number>x<reps>@<load>`.
    pub fn descriptor(&self) -> String {
        let load = self.load.map(|value| value.to_string()).unwrap_or_default();
        format!(
            "{}:{}x{}@{}",
            self.movement_name, self.set_number, self.reps, load
        )
    }
}
