use liftlog_tools::ToolError;
use liftlog_tools::catalog::CatalogStore;
use liftlog_tools::import;
use liftlog_tools::io::excel_write;
use liftlog_tools::model::Movement;
use std::fs;
use tempfile::tempdir;

#[test]
fn imports_tab_separated_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let tsv = temp_dir.path().join("import.tsv");
    fs::write(
        &tsv,
        "Exercise_Name\tMovement_Group\nSnatch\tFull Body\nClean\tFull Body\n",
    )
    .expect("source written");

    let count = import::import_from(&tsv, &store).expect("import ran");
    assert_eq!(count, 2);

    let catalog = store.load_all().expect("catalog loaded");
    let snatch = catalog.get("snatch").expect("snatch imported");
    assert_eq!(snatch.category, "Full Body");
    assert!(snatch.default_unit.is_empty());
    assert!(catalog.contains("clean"));
}

#[test]
fn comma_source_uses_alias_priority_and_skips_nameless_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let csv = temp_dir.path().join("import.csv");
    fs::write(
        &csv,
        "Exercise,Exercise Name,Movement_Group\n\
         Fallback,Preferred,Pull\n\
         Only Exercise,,Push\n\
         ,,Legs\n",
    )
    .expect("source written");

    let count = import::import_from(&csv, &store).expect("import ran");
    assert_eq!(count, 2);

    let names: Vec<String> = store
        .load_all()
        .expect("catalog loaded")
        .iter()
        .map(|movement| movement.name.clone())
        .collect();
    assert_eq!(names, vec!["Preferred", "Only Exercise"]);
}

#[test]
fn existing_and_repeated_names_are_skipped() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    store
        .append(&Movement::new("sn", "Snatch"))
        .expect("movement appended");
    let tsv = temp_dir.path().join("import.tsv");
    fs::write(
        &tsv,
        "Exercise_Name\tMovement_Group\nSNATCH\tFull Body\nJerk\tOverhead\njerk\tOverhead\n",
    )
    .expect("source written");

    assert_eq!(import::import_from(&tsv, &store).expect("import ran"), 1);
    assert_eq!(store.load_all().expect("catalog loaded").len(), 2);
}

#[test]
fn distinct_names_with_same_slug_get_suffixes() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let csv = temp_dir.path().join("import.csv");
    fs::write(&csv, "Exercise_Name\nPush-Up\nPushUp\nPush Up\n").expect("source written");

    assert_eq!(import::import_from(&csv, &store).expect("import ran"), 3);
    let ids: Vec<String> = store
        .load_all()
        .expect("catalog loaded")
        .iter()
        .map(|movement| movement.id.clone())
        .collect();
    assert_eq!(ids, vec!["pushup", "pushup_2", "push_up"]);
}

#[test]
fn missing_source_is_reported() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let missing = temp_dir.path().join("nope.tsv");

    let error = import::import_from(&missing, &store).expect_err("missing source");
    assert!(matches!(error, ToolError::SourceNotFound(path) if path == missing));
}

#[test]
fn empty_source_imports_nothing() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let empty = temp_dir.path().join("empty.csv");
    fs::write(&empty, "").expect("source written");

    assert_eq!(import::import_from(&empty, &store).expect("import ran"), 0);
}

#[test]
fn imports_first_worksheet_of_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));
    let xlsx = temp_dir.path().join("import.xlsx");
    excel_write::write_table(
        &xlsx,
        "Exercises",
        &["Exercise_Name", "Movement_Group"],
        &[
            vec!["Thruster".to_string(), "Full Body".to_string()],
            vec!["Wall Ball".to_string(), "Full Body".to_string()],
        ],
    )
    .expect("workbook written");

    assert_eq!(import::import_from(&xlsx, &store).expect("import ran"), 2);
    let catalog = store.load_all().expect("catalog loaded");
    assert_eq!(
        catalog.get("wall_ball").map(|movement| movement.category.as_str()),
        Some("Full Body")
    );
}

#[test]
fn unopenable_sources_are_reported_as_not_found() {
    let temp_dir = tempdir().expect("temporary directory");
    let store = CatalogStore::new(temp_dir.path().join("movements.csv"));

    for name in ["folder.csv", "folder.xlsx"] {
        let dir = temp_dir.path().join(name);
        fs::create_dir(&dir).expect("directory created");
        let error = import::import_from(&dir, &store).expect_err("directory rejected");
        assert!(matches!(error, ToolError::SourceNotFound(path) if path == dir));
    }
}
