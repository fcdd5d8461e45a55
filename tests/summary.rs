use liftlog_tools::log::SetLog;
use liftlog_tools::model::{Movement, SetRecord};
use liftlog_tools::summary::{self, WorkoutSummary};
use std::fs;
use tempfile::tempdir;

fn set(
    workout: &str,
    date: &str,
    movement: &Movement,
    number: u32,
    reps: &str,
    load: Option<f64>,
) -> SetRecord {
    let mut record = SetRecord::new(workout, date, "12:00:00", movement, number);
    record.reps = reps.to_string();
    record.load = load;
    record
}

#[test]
fn no_records_give_no_summaries() {
    assert!(summary::summarize(Vec::new()).is_empty());
}

#[test]
fn groups_in_first_seen_order_with_first_date() {
    let press = Movement::new("press", "Press");
    let row = Movement::new("row", "Row");
    let records = vec![
        set("w2", "2025-01-02", &press, 1, "5", Some(40.0)),
        set("w1", "2025-01-01", &row, 1, "8", None),
        set("w2", "2025-01-03", &press, 2, "AMRAP", Some(42.5)),
    ];

    let summaries = summary::summarize(records);
    assert_eq!(
        summaries,
        vec![
            WorkoutSummary {
                workout_id: "w2".into(),
                date: "2025-01-02".into(),
                sets: vec!["Press:1x5@40".into(), "Press:2xAMRAP@42.5".into()],
            },
            WorkoutSummary {
                workout_id: "w1".into(),
                date: "2025-01-01".into(),
                sets: vec!["Row:1x8@".into()],
            },
        ]
    );
    assert_eq!(summaries[0].movements_summary(), "Press:1x5@40;Press:2xAMRAP@42.5");
}

#[test]
fn every_logged_set_appears_once_in_the_export() {
    let temp_dir = tempdir().expect("temporary directory");
    let log = SetLog::new(temp_dir.path().join("workouts.csv"));
    let bar = Movement::new("bar", "Barbell Press");
    for (workout, number) in [("w1", 1), ("w1", 2), ("w2", 1), ("w1", 3), ("w3", 1)] {
        log.append(set(workout, "2025-01-01", &bar, number, "5", Some(100.0)))
            .expect("set appended");
    }

    let out = temp_dir.path().join("out.csv");
    let count = summary::export_summary(&log, &out).expect("summary exported");
    assert_eq!(count, 3);

    let mut reader = csv::Reader::from_path(&out).expect("summary opened");
    let headers = reader.headers().expect("headers read").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["workout_id", "date", "movements_summary"]);
    let tokens: usize = reader
        .records()
        .map(|record| record.expect("row read")[2].split(';').count())
        .sum();
    assert_eq!(tokens, 5);
}

#[test]
fn missing_log_exports_nothing() {
    let temp_dir = tempdir().expect("temporary directory");
    let log = SetLog::new(temp_dir.path().join("workouts.csv"));
    let out = temp_dir.path().join("out.csv");

    assert_eq!(summary::export_summary(&log, &out).expect("export ran"), 0);
    assert!(!out.exists());
}

#[test]
fn xlsx_output_writes_a_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let log = SetLog::new(temp_dir.path().join("workouts.csv"));
    let bar = Movement::new("bar", "Barbell Press");
    log.append(set("w1", "2025-01-01", &bar, 1, "5", Some(100.0)))
        .expect("set appended");

    let out = temp_dir.path().join("summary.xlsx");
    assert_eq!(summary::export_summary(&log, &out).expect("export ran"), 1);
    let bytes = fs::read(&out).expect("workbook read");
    assert!(bytes.starts_with(b"PK"));
}
