mod render;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use korjournal_core::{
    AppConfig, ClockField, CommitOutcome, CsvJournalRepository, DayField, FileMirror,
    FileTemplateRepository, JournalService, TripDraft, TripFilter,
};

#[derive(Parser)]
#[command(name = "korjournal")]
#[command(about = "A personal mileage logbook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by list, edit, delete, export and stats. Row numbers
/// printed by `list` are only meaningful together with the same filter.
#[derive(Args, Default)]
struct FilterArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Case-insensitive purpose substring
    #[arg(long)]
    purpose: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> TripFilter {
        TripFilter {
            from: self.from,
            to: self.to,
            purpose: self.purpose,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record a trip
    Add {
        /// Trip date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Departure time (HH:MM)
        #[arg(long)]
        start: String,
        /// Arrival time (HH:MM)
        #[arg(long)]
        end: String,
        /// Start location
        #[arg(long)]
        origin: String,
        /// End location
        #[arg(long)]
        destination: String,
        /// Distance in kilometres
        #[arg(long)]
        km: f64,
        /// Purpose of the trip
        #[arg(long)]
        purpose: String,
    },
    /// Add all quick-add templates for a date (e.g. the commute both ways)
    Quick {
        /// Trip date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List trips, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Edit the trip at a row of the listed view
    Edit {
        /// Row number as printed by `list` with the same filter flags
        #[arg(long)]
        row: usize,
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        set_date: Option<NaiveDate>,
        #[arg(long)]
        set_start: Option<String>,
        #[arg(long)]
        set_end: Option<String>,
        #[arg(long)]
        set_origin: Option<String>,
        #[arg(long)]
        set_destination: Option<String>,
        #[arg(long)]
        set_km: Option<f64>,
        #[arg(long)]
        set_purpose: Option<String>,
    },
    /// Delete the trip at a row of the listed view
    Delete {
        /// Row number as printed by `list` with the same filter flags
        #[arg(long)]
        row: usize,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Merge trips from another file in the journal format
    Import { path: PathBuf },
    /// Write the (filtered) journal to a file in the journal format
    Export {
        path: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show totals and per-month distance
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        println!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(None)?;
    let repo = CsvJournalRepository::new(None)?;
    let service = match config.mirror_path {
        Some(path) => JournalService::with_mirror(repo, Box::new(FileMirror::new(path))),
        None => JournalService::new(repo),
    };
    let log = service.load()?;

    match cli.command {
        Commands::Add {
            date,
            start,
            end,
            origin,
            destination,
            km,
            purpose,
        } => {
            let draft = TripDraft {
                date: DayField::Value(date.unwrap_or_else(today)),
                start_time: ClockField::Text(start),
                end_time: ClockField::Text(end),
                origin,
                destination,
                distance_km: km,
                purpose,
            };
            let outcome = service.add_trip(&log, draft)?;
            report_warnings(&outcome);
            if let Some(added) = outcome.log.records().last() {
                println!(
                    "Trip added: {} {} -> {}, {} min, {:.1} km",
                    added.date, added.origin, added.destination, added.duration_minutes,
                    added.distance_km
                );
            }
        }
        Commands::Quick { date } => {
            let templates = FileTemplateRepository::new(None)?.list()?;
            if templates.is_empty() {
                println!("No quick-add templates defined.");
                return Ok(());
            }
            let date = date.unwrap_or_else(today);
            let outcome = service.quick_add(&log, date, &templates)?;
            report_warnings(&outcome);
            println!("Added {} trip(s) for {}.", templates.len(), date);
        }
        Commands::List { filter } => {
            let filter = filter.into_filter();
            render::print_trips(&filter.apply(&log));
        }
        Commands::Edit {
            row,
            filter,
            set_date,
            set_start,
            set_end,
            set_origin,
            set_destination,
            set_km,
            set_purpose,
        } => {
            let filter = filter.into_filter();
            let id = service.resolve_row(&log, &filter, row_index(row)?)?;
            // Seed the draft from the current record, then apply overrides.
            let current = log
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("trip disappeared while editing"))?;
            let mut draft = TripDraft::from_record(current);
            if let Some(d) = set_date {
                draft.date = DayField::Value(d);
            }
            if let Some(s) = set_start {
                draft.start_time = ClockField::Text(s);
            }
            if let Some(e) = set_end {
                draft.end_time = ClockField::Text(e);
            }
            if let Some(o) = set_origin {
                draft.origin = o;
            }
            if let Some(d) = set_destination {
                draft.destination = d;
            }
            if let Some(km) = set_km {
                draft.distance_km = km;
            }
            if let Some(p) = set_purpose {
                draft.purpose = p;
            }
            let outcome = service.update_trip(&log, id, draft)?;
            report_warnings(&outcome);
            if let Some(edited) = outcome.log.get(id) {
                println!(
                    "Trip updated: {} {} -> {}, {} min, {:.1} km",
                    edited.date, edited.origin, edited.destination, edited.duration_minutes,
                    edited.distance_km
                );
            }
        }
        Commands::Delete { row, filter } => {
            let filter = filter.into_filter();
            let id = service.resolve_row(&log, &filter, row_index(row)?)?;
            let outcome = service.delete_trip(&log, id)?;
            report_warnings(&outcome);
            println!("Trip deleted. {} record(s) remain.", outcome.log.len());
        }
        Commands::Import { path } => {
            let outcome = service.import_file(&log, &path)?;
            report_warnings(&outcome);
            println!(
                "Imported {} trip(s) from {}.",
                outcome.log.len() - log.len(),
                path.display()
            );
        }
        Commands::Export { path, filter } => {
            let filter = filter.into_filter();
            let count = service.export_file(&log, &filter, &path)?;
            println!("Exported {} trip(s) to {}.", count, path.display());
        }
        Commands::Stats { filter } => {
            let filter = filter.into_filter();
            let stats = service.stats(&log, &filter);
            render::print_stats(&stats);
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn row_index(row: usize) -> Result<usize> {
    // Rows are numbered from 1 in the listing.
    row.checked_sub(1)
        .ok_or_else(|| anyhow::anyhow!("row numbers start at 1"))
}

fn report_warnings(outcome: &CommitOutcome) {
    for warning in &outcome.warnings {
        println!("Warning: {warning}");
    }
}
