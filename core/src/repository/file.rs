use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};

use crate::model::trip::TripRecord;
use crate::normalize::{normalize_lenient, TripDraft};
use crate::repository::traits::JournalRepository;
use crate::store::TripLog;
use crate::time::{format_clock, format_day};

const DEFAULT_FILE_NAME: &str = "korjournal.csv";

/// Canonical header, exact labels in exact order. `Restid (min)` is written
/// for display but never trusted on read; the duration is always recomputed
/// from the time columns.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    "Datum",
    "Starttid",
    "Sluttid",
    "Restid (min)",
    "Startplats",
    "Slutplats",
    "Sträcka (km)",
    "Syfte",
];

/// Result of reading a tabular file: the surviving records plus counts of
/// rows that did not come through cleanly, for user-facing warnings.
#[derive(Debug, Default)]
pub struct ReadOutcome {
    pub trips: Vec<TripRecord>,
    /// Rows dropped because the `Datum` cell was missing or unparseable.
    pub dropped_rows: usize,
    /// Rows kept but with a malformed time cell, so their duration fell
    /// back to zero.
    pub degraded_times: usize,
}

/// Reads any file in the canonical format. Columns are matched by header
/// label; an expected column that is absent reads as empty for every row
/// rather than failing the file.
pub fn read_trips(path: &Path) -> Result<ReadOutcome> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("could not open {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let column_index: Vec<Option<usize>> = EXPECTED_COLUMNS
        .iter()
        .map(|label| headers.iter().position(|h| h.trim() == *label))
        .collect();

    let cell = |row: &StringRecord, col: usize| -> String {
        column_index[col]
            .and_then(|i| row.get(i))
            .unwrap_or("")
            .trim()
            .to_string()
    };

    let mut outcome = ReadOutcome::default();
    for row in reader.records() {
        let row = row?;
        let draft = TripDraft::from_text(
            cell(&row, 0),
            cell(&row, 1),
            cell(&row, 2),
            cell(&row, 4),
            cell(&row, 5),
            parse_distance(&cell(&row, 6)),
            cell(&row, 7),
        );
        match normalize_lenient(draft) {
            Some(lenient) => {
                if lenient.degraded_time {
                    outcome.degraded_times += 1;
                }
                outcome.trips.push(lenient.record);
            }
            None => outcome.dropped_rows += 1,
        }
    }
    Ok(outcome)
}

/// Writes records in the canonical format, header row first.
pub fn write_trips(path: &Path, trips: &[TripRecord]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("could not write {}", path.display()))?;
    writer.write_record(EXPECTED_COLUMNS)?;
    for trip in trips {
        writer.write_record([
            format_day(trip.date),
            format_clock(trip.start_time),
            format_clock(trip.end_time),
            trip.duration_minutes.to_string(),
            trip.origin.clone(),
            trip.destination.clone(),
            // Full value; one-fractional-digit rounding is display-only.
            trip.distance_km.to_string(),
            trip.purpose.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_distance(cell: &str) -> f64 {
    // Legacy spreadsheets use a decimal comma.
    cell.replace(',', ".").parse().unwrap_or(0.0)
}

pub struct CsvJournalRepository {
    file_path: PathBuf,
}

impl CsvJournalRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".korjournal")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            write_trips(&path, &[])?;
        }

        Ok(CsvJournalRepository { file_path: path })
    }

    /// Repository over an explicit file, used for import/export targets and
    /// in tests.
    pub fn at_path(file_path: PathBuf) -> Self {
        CsvJournalRepository { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl JournalRepository for CsvJournalRepository {
    fn load(&self) -> Result<TripLog> {
        if !self.file_path.exists() {
            return Ok(TripLog::new());
        }
        let outcome = read_trips(&self.file_path)?;
        Ok(TripLog::from_records(outcome.trips))
    }

    /// Wholesale overwrite, made atomic by writing a sibling temp file and
    /// renaming it over the real one. A half-written file never replaces
    /// the previous save.
    fn save(&self, log: &TripLog) -> Result<()> {
        let file_name = self
            .file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_FILE_NAME);
        let tmp_path = self.file_path.with_file_name(format!("{file_name}.tmp"));
        write_trips(&tmp_path, log.records())?;
        fs::rename(&tmp_path, &self.file_path)
            .with_context(|| format!("could not replace {}", self.file_path.display()))?;
        Ok(())
    }
}
