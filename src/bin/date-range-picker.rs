//! Date Range Picker CLI tool
//!
//! Drives the headless picker from the command line: list presets, classify
//! ranges, print month grids, and replay event scripts against a session.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};

use date_range_picker::calendar::CalendarId;
use date_range_picker::config::{PickerConfig, DEFAULT_CONFIG_FILE};
use date_range_picker::date::{self, month_grid, month_label, parse_day, parse_month, GridCell, WEEKDAY_HEADERS};
use date_range_picker::picker::{DateRange, PickerEvent, RangePicker};
use date_range_picker::presets::{PresetCatalog, PresetMatch};

/// Date Range Picker - headless date-range selection
#[derive(Parser)]
#[command(name = "date-range-picker")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # List presets as of a given day
    date-range-picker presets --today 2024-06-15

    # Which preset does a range match?
    date-range-picker detect today-6 today

    # Print a month grid
    date-range-picker grid 2024-06

    # Replay a session
    date-range-picker session --today 2024-06-15 open \"pick 2024-06-01\" \"pick 2024-06-10\" apply")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List presets and the ranges they resolve to
    Presets {
        /// Reference day (e.g., "today", "today-3", "2024-06-15")
        #[arg(long)]
        today: Option<String>,
    },

    /// Report which preset, if any, a range matches
    Detect {
        /// First day of the range
        start: String,

        /// Last day of the range
        end: String,

        /// Reference day
        #[arg(long)]
        today: Option<String>,
    },

    /// Print the 6x7 grid for a month
    Grid {
        /// Month as YYYY-MM
        month: String,
    },

    /// Run picker events and print the state after each
    Session {
        /// Configuration file (defaults to ./date-range-picker.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reference day
        #[arg(long)]
        today: Option<String>,

        /// Initial applied value
        #[arg(long, num_args = 2, value_names = ["START", "END"])]
        value: Option<Vec<String>>,

        /// Read events from a file, one per line ('#' starts a comment)
        #[arg(long)]
        script: Option<PathBuf>,

        /// Events, e.g. "open" "pick 2024-06-01" "apply"
        events: Vec<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Presets { today } => cmd_presets(today),
        Commands::Detect { start, end, today } => cmd_detect(start, end, today),
        Commands::Grid { month } => cmd_grid(month),
        Commands::Session { config, today, value, script, events } => {
            cmd_session(config, today, value, script, events)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Resolve the reference day, defaulting to the local date
fn reference_day(today: Option<String>) -> Result<NaiveDate> {
    let actual = date::today();
    match today {
        Some(expr) => parse_day(&expr, actual).with_context(|| format!("--today {}", expr)),
        None => Ok(actual),
    }
}

fn cmd_presets(today: Option<String>) -> Result<()> {
    let today = reference_day(today)?;
    let catalog = PresetCatalog::standard();

    for key in catalog.visible() {
        let range = catalog.resolve(*key, today);
        println!("{:<10} {:<14} {}", key.as_str(), key.label(), range);
    }
    Ok(())
}

fn cmd_detect(start: String, end: String, today: Option<String>) -> Result<()> {
    let today = reference_day(today)?;
    let start = parse_day(&start, today).context("range start")?;
    let end = parse_day(&end, today).context("range end")?;
    let range = DateRange::complete(start, end);

    match PresetCatalog::standard().detect(&range, today) {
        Some(PresetMatch::Preset(key)) => println!("{} ({})", key.label(), range),
        _ => println!("Custom ({})", range),
    }
    Ok(())
}

fn cmd_grid(month: String) -> Result<()> {
    let month = parse_month(&month)?;

    println!("{:^20}", month_label(month));
    println!("{}", WEEKDAY_HEADERS.map(|h| format!("{:>2}", h)).join(" "));

    let cells: Vec<GridCell> = month_grid(month).collect();
    for week in cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell.day() {
                Some(d) => format!("{:>2}", d.day()),
                None => "  ".to_string(),
            })
            .collect();
        println!("{}", row.join(" ").trim_end());
    }
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<PickerConfig> {
    let mut config = match path {
        Some(path) => PickerConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PickerConfig::load_or_default()
            .with_context(|| format!("Failed to load {}", DEFAULT_CONFIG_FILE))?,
    };
    config.merge_with_env();
    config.validate()?;
    Ok(config)
}

fn cmd_session(
    config: Option<PathBuf>,
    today: Option<String>,
    value: Option<Vec<String>>,
    script: Option<PathBuf>,
    mut events: Vec<String>,
) -> Result<()> {
    let today = reference_day(today)?;
    let config = load_config(config)?;

    let value = match value.as_deref() {
        Some([start, end]) => {
            DateRange::complete(parse_day(start, today)?, parse_day(end, today)?)
        }
        Some(_) => bail!("--value takes a start and an end day"),
        None => DateRange::empty(),
    };

    if let Some(path) = script {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let lines = content
            .lines()
            .map(|l| l.split('#').next().unwrap_or("").trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        events.splice(0..0, lines);
    }

    if events.is_empty() {
        eprintln!("No events given (config: {} or defaults)", DEFAULT_CONFIG_FILE);
    }

    let mut picker = RangePicker::with_today(config, value, today);
    print_state("start", &mut picker);

    for line in &events {
        let event = PickerEvent::parse(line, today)?;
        picker.dispatch(event);
        print_state(line, &mut picker);
    }
    Ok(())
}

fn print_state(step: &str, picker: &mut RangePicker) {
    println!("> {}", step);
    for value in picker.drain_changes() {
        println!("  emitted: [{}]", value);
    }

    let label = picker.trigger_label();
    let label = if label.is_empty() { picker.placeholder().to_string() } else { label };
    println!("  state:   {:?}  trigger: {}", picker.state(), label);

    if picker.is_open() {
        println!("  draft:   [{}]  editing: {:?}", picker.draft(), picker.active_field());
        println!(
            "  window:  {} | {}",
            picker.window().label(CalendarId::Top),
            picker.window().label(CalendarId::Bottom)
        );
        for err in picker.validation_errors() {
            println!("  invalid: {}", err);
        }
        if let Some(hint) = picker.apply_hint() {
            println!("  hint:    {}", hint);
        }
    } else if picker.applied().is_complete() {
        println!("  {}", picker.selection_message());
    } else {
        println!("  {}", picker.date_range_message());
    }
}
