use std::path::Path;

use tracing::{debug, info, instrument};

use crate::liftlog::tools::catalog::CatalogStore;
use crate::liftlog::tools::error::Result;
use crate::liftlog::tools::io::source::{SourceTable, read_source};
use crate::liftlog::tools::model::Movement;
use crate::liftlog::tools::slug;

/// Header names accepted for the exercise name, highest priority first.
pub const NAME_ALIASES: [&str; 3] = ["Exercise_Name", "Exercise Name", "Exercise"];

/// Header name of the category column.
pub const CATEGORY_ALIAS: &str = "Movement_Group";

/// Imports movements from a TSV, CSV or `.xlsx` file into the catalog and
/// returns how many were created.
#[instrument(level = "info", skip_all, fields(source = %path.display()))]
pub fn import_from(path: &Path, catalog: &CatalogStore) -> Result<usize> {
    let table = read_source(path)?;
    import_table(&table, catalog)
}

/// Imports the rows of an already parsed source table.
///
/// A row is skipped when none of the [`NAME_ALIASES`] columns holds a
/// non-empty name, or when a movement with the same name (ignoring case)
/// already exists, including movements created earlier in the same run.
pub fn import_table(table: &SourceTable, catalog: &CatalogStore) -> Result<usize> {
    let name_columns: Vec<usize> = NAME_ALIASES
        .iter()
        .filter_map(|alias| table.column(alias))
        .collect();
    let category_column = table.column(CATEGORY_ALIAS);

    let mut known = catalog.load_all()?;
    let mut ids = known.ids();
    let mut created = 0;

    for row in &table.rows {
        let Some(name) = name_columns
            .iter()
            .map(|&column| table.cell(row, column).trim())
            .find(|name| !name.is_empty())
        else {
            continue;
        };
        if known.find_by_name(name).is_some() {
            debug!(name, "skipping movement already in catalog");
            continue;
        }

        let id = slug::resolve_unique(name, &ids);
        let category = category_column
            .map(|column| table.cell(row, column).trim())
            .unwrap_or("");
        let movement = Movement::new(id.clone(), name).with_category(category);
        catalog.append(&movement)?;
        ids.insert(id);
        known.insert(movement);
        created += 1;
    }

    info!(created, "imported movements");
    Ok(created)
}
