//! Movement catalog: the dimension table of the workout data.
//!
//! The catalog file is the source of truth. Every mutating call either
//! appends a row or rewrites the whole file before returning; nothing is
//! buffered between calls.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::liftlog::tools::error::{Result, ToolError};
use crate::liftlog::tools::io::csv_file;
use crate::liftlog::tools::model::{MOVEMENT_COLUMNS, Movement, MovementId};
use crate::liftlog::tools::slug;

/// In-memory snapshot of the catalog keyed by id, iterated in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    movements: Vec<Movement>,
    positions: HashMap<MovementId, usize>,
}

impl Catalog {
    /// Builds a snapshot from rows in file order. A later row with an id seen
    /// before replaces the earlier contents but keeps its position.
    pub fn from_rows(rows: impl IntoIterator<Item = Movement>) -> Self {
        let mut catalog = Self::default();
        for row in rows {
            catalog.insert(row);
        }
        catalog
    }

    /// Inserts or replaces the movement stored under `movement.id`.
    pub fn insert(&mut self, movement: Movement) {
        match self.positions.get(&movement.id) {
            Some(&position) => self.movements[position] = movement,
            None => {
                self.positions
                    .insert(movement.id.clone(), self.movements.len());
                self.movements.push(movement);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Movement> {
        self.positions.get(id).map(|&position| &self.movements[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Movements in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Movement> {
        self.movements.iter()
    }

    /// The set of ids currently in use.
    pub fn ids(&self) -> HashSet<MovementId> {
        self.positions.keys().cloned().collect()
    }

    /// First movement whose name equals `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Movement> {
        self.movements.iter().find(|movement| movement.name_matches(name))
    }

    /// Movements whose name or id contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Movement> {
        let query = query.to_lowercase();
        self.movements
            .iter()
            .filter(|movement| {
                movement.name.to_lowercase().contains(&query)
                    || movement.id.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn into_movements(self) -> Vec<Movement> {
        self.movements
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Movement;
    type IntoIter = std::slice::Iter<'a, Movement>;

    fn into_iter(self) -> Self::IntoIter {
        self.movements.iter()
    }
}

/// File-backed movement catalog.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole catalog. A missing file yields an empty catalog.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    pub fn load_all(&self) -> Result<Catalog> {
        let rows: Vec<Movement> = csv_file::read_rows(&self.path)?;
        let catalog = Catalog::from_rows(rows.into_iter().map(|mut movement| {
            if movement.id.is_empty() {
                movement.id = slug::normalize(&movement.name);
            }
            movement
        }));
        debug!(movement_count = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Appends a movement, refusing ids that the catalog already holds.
    #[instrument(level = "info", skip_all, fields(id = %movement.id))]
    pub fn append(&self, movement: &Movement) -> Result<()> {
        if self.load_all()?.contains(&movement.id) {
            return Err(ToolError::DuplicateIdentifier(movement.id.clone()));
        }
        csv_file::append_row(&self.path, &MOVEMENT_COLUMNS, movement)?;
        info!(name = %movement.name, "added movement");
        Ok(())
    }

    /// Atomically rewrites the catalog with `movements` in the given order.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub fn save_all(&self, movements: &[Movement]) -> Result<()> {
        csv_file::rewrite(&self.path, &MOVEMENT_COLUMNS, movements)?;
        info!(movement_count = movements.len(), "rewrote catalog");
        Ok(())
    }

    /// Case-insensitive substring search over names and ids.
    pub fn find(&self, query: &str) -> Result<Vec<Movement>> {
        Ok(self.load_all()?.search(query))
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Movement>> {
        Ok(self.load_all()?.find_by_name(name).cloned())
    }
}
