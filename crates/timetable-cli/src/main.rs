//! `timetable` CLI — check weekly school timetables for double-bookings.
//!
//! Input is a JSON document with the dashboard's shape:
//!
//! ```json
//! { "schedule": [ { "id": "a", "subject": "Physics", "teacher": "Reed", ... } ],
//!   "resources": [ { "id": "sci_lab", "name": "Science Lab", "type": "Room", "capacity": 24 } ] }
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Conflicts as JSON (stdin → stdout)
//! cat week.json | timetable check
//!
//! # Human-readable report, non-zero exit when anything clashes
//! timetable check -i week.json --format text --fail-on-conflict
//!
//! # Check invariants of a generated draft
//! timetable validate -i draft.json
//!
//! # Open slots for a teacher on a custom grid
//! timetable free-slots -i week.json --teacher Reed --day Monday --config grid.json
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for detection details.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::io::{self, Read};
use std::process;
use timetable_engine::{
    detect_conflicts_with_grid, teacher_occupied, validate_resources, validate_schedule, Conflict,
    EngineConfig, Resource, ScheduleItem, SlotGrid, Weekday,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status of `check --fail-on-conflict` when conflicts were found.
const EXIT_CONFLICTS: i32 = 2;

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Detect teacher, room and student-group double-bookings in a weekly timetable"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log detection details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect conflicts and print them with remediation suggestions
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Slot grid configuration (JSON)
        #[arg(long)]
        config: Option<String>,
        /// Exit with status 2 when any conflict is found
        #[arg(long)]
        fail_on_conflict: bool,
    },
    /// Check ids, times and room references; exits 1 on any issue
    Validate {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// List grid slots on a day where a teacher has no class
    FreeSlots {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Teacher name as it appears in the schedule
        #[arg(long)]
        teacher: String,
        /// School day (e.g. Monday)
        #[arg(long)]
        day: String,
        /// Slot grid configuration (JSON)
        #[arg(long)]
        config: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// The dashboard's export shape. Either list may be omitted.
#[derive(Deserialize)]
struct Timetable {
    #[serde(default)]
    schedule: Vec<ScheduleItem>,
    #[serde(default)]
    resources: Vec<Resource>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check {
            input,
            output,
            format,
            config,
            fail_on_conflict,
        } => {
            let timetable = read_timetable(input.as_deref())?;
            let grid = load_grid(config.as_deref())?;

            let conflicts =
                detect_conflicts_with_grid(&timetable.schedule, &timetable.resources, &grid);
            debug!(conflicts = conflicts.len(), "detection finished");

            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&conflicts)
                    .context("Failed to serialize conflicts")?,
                Format::Text => render_text(&conflicts),
            };
            write_output(output.as_deref(), &rendered)?;

            if fail_on_conflict && !conflicts.is_empty() {
                process::exit(EXIT_CONFLICTS);
            }
        }
        Commands::Validate { input } => {
            let timetable = read_timetable(input.as_deref())?;

            let mut issues = validate_resources(&timetable.resources);
            issues.extend(validate_schedule(&timetable.schedule, &timetable.resources));

            if issues.is_empty() {
                println!("OK");
            } else {
                for issue in &issues {
                    println!("{}", issue);
                }
                process::exit(1);
            }
        }
        Commands::FreeSlots {
            input,
            teacher,
            day,
            config,
        } => {
            let day: Weekday = day.parse().context("Invalid --day")?;
            let timetable = read_timetable(input.as_deref())?;
            let grid = load_grid(config.as_deref())?;

            if !grid.has_day(day) {
                anyhow::bail!("{} is not a school day in the configured grid", day);
            }

            let occupied = teacher_occupied(&timetable.schedule, &teacher, day);

            for slot in grid.free_slots(&occupied) {
                println!("{}", slot);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_grid(path: Option<&str>) -> Result<SlotGrid> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => EngineConfig::default(),
    };
    config.into_grid().context("Invalid slot grid configuration")
}

fn read_timetable(path: Option<&str>) -> Result<Timetable> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse timetable JSON")
}

/// One block per conflict: the message, then indented suggestions.
fn render_text(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return "No conflicts.\n".to_string();
    }
    let mut out = String::new();
    for conflict in conflicts {
        out.push_str(&format!("[{}] {}\n", conflict.item_id, conflict.message));
        for suggestion in &conflict.suggestions {
            out.push_str(&format!("  - {}\n", suggestion));
        }
    }
    out
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
