use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liftlog_tools::commands::{self, LoggedSet, MovementDraft, SessionEntry, SetDraft};
use liftlog_tools::model::Movement;
use liftlog_tools::{Result, ToolError, config::StorePaths};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let paths = StorePaths::in_dir(&cli.data_dir);
    match cli.command {
        Command::Init => execute_init(&paths),
        Command::ListMovements { json } => execute_list(&paths, json),
        Command::FindMovement { name, json } => execute_find(&paths, &name, json),
        Command::AddMovement(args) => execute_add_movement(&paths, args),
        Command::AddSet(args) => execute_add_set(&paths, args),
        Command::ImportMovements { file } => {
            let count = commands::import_movements(&paths, &file)?;
            println!("Imported {count} movements");
            Ok(())
        }
        Command::ExportSummary { out } => {
            let count = commands::export_summary(&paths, &out)?;
            println!("Exported {count} workouts to {}", out.display());
            Ok(())
        }
        Command::StartSession { workout_id, date } => execute_session(&paths, workout_id, date),
    }
}

fn execute_init(paths: &StorePaths) -> Result<()> {
    for created in commands::init(paths)? {
        println!("Created {}", created.display());
    }
    println!("Initialization complete.");
    Ok(())
}

fn execute_list(paths: &StorePaths, json: bool) -> Result<()> {
    let catalog = commands::list_movements(paths)?;
    if json {
        let movements: Vec<&Movement> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&movements)?);
        return Ok(());
    }
    if catalog.is_empty() {
        println!("No movements found. Run 'init' or add movements.");
        return Ok(());
    }
    for movement in &catalog {
        println!(
            "{}\t{}\t{}\t{}",
            movement.id, movement.name, movement.category, movement.default_unit
        );
    }
    Ok(())
}

fn execute_find(paths: &StorePaths, query: &str, json: bool) -> Result<()> {
    let matches = commands::find_movements(paths, query)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }
    if matches.is_empty() {
        println!("No matches");
        return Ok(());
    }
    for movement in &matches {
        println!("{}\t{}\t{}", movement.id, movement.name, movement.category);
    }
    Ok(())
}

fn execute_add_movement(paths: &StorePaths, args: AddMovementArgs) -> Result<()> {
    let movement = commands::add_movement(
        paths,
        MovementDraft {
            id: args.id,
            name: args.name,
            category: args.category.unwrap_or_default(),
            default_unit: args.default_unit.unwrap_or_default(),
            primary_muscle: args.primary_muscle.unwrap_or_default(),
            secondary_muscles: args.secondary_muscles.unwrap_or_default(),
            notes: args.notes.unwrap_or_default(),
        },
    )?;
    println!("Added movement {} - {}", movement.id, movement.name);
    Ok(())
}

fn execute_add_set(paths: &StorePaths, args: AddSetArgs) -> Result<()> {
    let logged = commands::add_set(
        paths,
        SetDraft {
            workout_id: args.workout_id,
            date: args.date,
            start_time: args.start_time,
            movement_id: args.movement_id,
            movement_name: args.movement_name,
            set_number: args.set_number,
            set_type: args.set_type,
            cluster_id: args.cluster_id,
            reps: args.reps,
            load: args.load,
            unit: args.unit,
            rest_seconds: args.rest_seconds,
            rpe: args.rpe,
            tags: args.tags,
            notes: args.notes,
        },
    )?;
    report_logged(&logged);
    Ok(())
}

fn report_logged(logged: &LoggedSet) {
    if let Some(movement) = &logged.created_movement {
        println!("Added movement {} - {}", movement.id, movement.name);
    }
    if let Some(warning) = &logged.warning {
        println!("Warning: {warning}");
    }
    let record = &logged.record;
    println!(
        "Appended set: {} {} set {}",
        record.workout_id, record.movement_name, record.set_number
    );
}

fn execute_session(
    paths: &StorePaths,
    workout_id: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let mut session = commands::Session::start(paths, workout_id, date)?;
    println!(
        "Starting session {} on {} (press enter without movement to finish)",
        session.workout_id(),
        session.date()
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let movement = prompt(&mut input, "Movement name (or blank to finish): ")?;
        if movement.is_empty() {
            break;
        }
        let reps = prompt(&mut input, "Reps (e.g., 5 or AMRAP): ")?;
        let load = loop {
            let raw = prompt(&mut input, "Load (leave blank for bodyweight): ")?;
            if raw.is_empty() {
                break None;
            }
            match raw.parse::<f64>() {
                Ok(value) => break Some(value),
                Err(_) => println!("Load must be a number"),
            }
        };
        let unit = prompt(&mut input, "Unit (kg/lb/bodyweight) [enter for default]: ")?;
        let set_type = prompt(&mut input, "Set type (work/warmup/drop) [work]: ")?;

        let logged = session.log_set(SessionEntry {
            movement,
            reps,
            load,
            unit: Some(unit),
            set_type: Some(set_type),
        })?;
        report_logged(&logged);
    }
    Ok(())
}

/// Prints `label` and reads one trimmed line. End of input reads as blank.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[derive(Parser)]
#[command(author, version, about = "Workout CSV helper CLI")]
struct Cli {
    /// Directory holding movements.csv and workouts.csv.
    #[arg(long, global = true, env = "LIFTLOG_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create CSV templates if missing.
    Init,
    /// List movements from the catalog.
    ListMovements {
        /// Print the movements as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Find movements by name or id substring.
    FindMovement {
        #[arg(long)]
        name: String,
        /// Print the matches as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Add a movement to movements.csv.
    AddMovement(AddMovementArgs),
    /// Append a set to workouts.csv.
    AddSet(AddSetArgs),
    /// Import movements from a TSV, CSV or xlsx file.
    ImportMovements {
        /// Path to the file to import.
        #[arg(long)]
        file: PathBuf,
    },
    /// Export a one-row-per-workout summary.
    ExportSummary {
        /// Output path; a .xlsx extension writes a workbook.
        #[arg(long, default_value = "workouts_summary.csv")]
        out: PathBuf,
    },
    /// Interactively log multiple sets.
    StartSession {
        /// Workout id to use instead of a generated one.
        #[arg(long, alias = "workout_id")]
        workout_id: Option<String>,
        /// Session date (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(clap::Args)]
struct AddMovementArgs {
    /// Movement id; derived from the name when omitted.
    #[arg(long)]
    id: Option<String>,
    /// Movement name.
    #[arg(long)]
    name: String,
    #[arg(long)]
    category: Option<String>,
    /// kg, lb or bodyweight.
    #[arg(long, alias = "default_unit")]
    default_unit: Option<String>,
    #[arg(long, alias = "primary_muscle")]
    primary_muscle: Option<String>,
    /// Semicolon separated list.
    #[arg(long, alias = "secondary_muscles")]
    secondary_muscles: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(clap::Args)]
struct AddSetArgs {
    /// Existing workout id; a new one is generated when omitted.
    #[arg(long, alias = "workout_id")]
    workout_id: Option<String>,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    date: Option<String>,
    /// HH:MM:SS, defaults to now.
    #[arg(long, alias = "start_time")]
    start_time: Option<String>,
    /// Movement id from the catalog.
    #[arg(long, alias = "movement_id")]
    movement_id: Option<String>,
    /// Movement name; created in the catalog when missing.
    #[arg(long, alias = "movement_name")]
    movement_name: Option<String>,
    /// Set number in sequence.
    #[arg(long, alias = "set_number", value_parser = clap::value_parser!(u32).range(1..))]
    set_number: u32,
    /// warmup, work, drop, ...
    #[arg(long, alias = "set_type")]
    set_type: Option<String>,
    /// Group id for supersets and drop clusters.
    #[arg(long, alias = "cluster_id")]
    cluster_id: Option<String>,
    /// Rep count or a tag such as AMRAP.
    #[arg(long)]
    reps: Option<String>,
    #[arg(long)]
    load: Option<f64>,
    #[arg(long)]
    unit: Option<String>,
    #[arg(long, alias = "rest_seconds")]
    rest_seconds: Option<u32>,
    #[arg(long)]
    rpe: Option<f64>,
    /// Semicolon separated tags.
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}
