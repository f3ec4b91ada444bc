use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::stats::JournalStats;
use crate::model::template::TripTemplate;
use crate::normalize::{normalize, TripDraft};
use crate::repository::file::{read_trips, write_trips};
use crate::repository::traits::{JournalMirror, JournalRepository};
use crate::store::{TripFilter, TripLog};

/// Result of a committed mutation: the new log plus any non-fatal warnings
/// (mirror push failures, skipped import rows).
#[derive(Debug)]
pub struct CommitOutcome {
    pub log: TripLog,
    pub warnings: Vec<String>,
}

/// One user interaction runs load-or-reuse, mutate, persist, redisplay.
///
/// Every mutating operation takes the caller's current log by reference and
/// returns the updated one inside a [`CommitOutcome`]. The candidate log is
/// persisted before it is handed back, so when persistence fails the caller
/// still holds the previous state untouched and can retry.
pub struct JournalService<R: JournalRepository> {
    repo: R,
    mirror: Option<Box<dyn JournalMirror>>,
}

impl<R: JournalRepository> JournalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo, mirror: None }
    }

    pub fn with_mirror(repo: R, mirror: Box<dyn JournalMirror>) -> Self {
        Self {
            repo,
            mirror: Some(mirror),
        }
    }

    pub fn load(&self) -> Result<TripLog> {
        self.repo.load()
    }

    fn commit(&self, log: TripLog, mut warnings: Vec<String>) -> Result<CommitOutcome> {
        self.repo.save(&log)?;
        if let Some(mirror) = &self.mirror {
            if let Err(e) = mirror.push(&log) {
                warnings.push(format!(
                    "mirror copy to {} failed: {e:#}",
                    mirror.describe()
                ));
            }
        }
        Ok(CommitOutcome { log, warnings })
    }

    pub fn add_trip(&self, log: &TripLog, draft: TripDraft) -> Result<CommitOutcome> {
        let record = normalize(draft)?;
        let mut next = log.clone();
        next.append(record);
        self.commit(next, Vec::new())
    }

    /// Appends one trip per template for the given date.
    pub fn quick_add(
        &self,
        log: &TripLog,
        date: NaiveDate,
        templates: &[TripTemplate],
    ) -> Result<CommitOutcome> {
        let mut next = log.clone();
        for template in templates {
            let record = normalize(template.draft_for(date))?;
            next.append(record);
        }
        self.commit(next, Vec::new())
    }

    pub fn update_trip(&self, log: &TripLog, id: Uuid, draft: TripDraft) -> Result<CommitOutcome> {
        let mut record = normalize(draft)?;
        record.id = id;
        let mut next = log.clone();
        next.update(record)?;
        self.commit(next, Vec::new())
    }

    pub fn delete_trip(&self, log: &TripLog, id: Uuid) -> Result<CommitOutcome> {
        let mut next = log.clone();
        next.remove(id)?;
        self.commit(next, Vec::new())
    }

    /// Resolves a 0-based row of the filtered view to its backing record id.
    /// The view is recomputed here, so the row must come from a listing made
    /// with the same filter.
    pub fn resolve_row(&self, log: &TripLog, filter: &TripFilter, row: usize) -> Result<Uuid> {
        filter
            .id_at(log, row)
            .ok_or_else(|| anyhow!("no row {} in the current view", row + 1))
    }

    /// Merges all rows of a canonical-format file after the existing
    /// records. Rows without a valid date are skipped and reported.
    pub fn import_file(&self, log: &TripLog, path: &Path) -> Result<CommitOutcome> {
        let outcome = read_trips(path)?;
        let mut warnings = Vec::new();
        if outcome.dropped_rows > 0 {
            warnings.push(format!(
                "{} row(s) skipped: missing or invalid date",
                outcome.dropped_rows
            ));
        }
        if outcome.degraded_times > 0 {
            warnings.push(format!(
                "{} row(s) had malformed times, their duration was set to 0",
                outcome.degraded_times
            ));
        }

        let mut next = log.clone();
        for trip in outcome.trips {
            next.append(trip);
        }
        self.commit(next, warnings)
    }

    /// Writes the current view to a canonical-format file. Does not touch
    /// the journal itself. Returns the number of exported rows.
    pub fn export_file(&self, log: &TripLog, filter: &TripFilter, path: &Path) -> Result<usize> {
        let view: Vec<_> = filter.apply(log).into_iter().cloned().collect();
        write_trips(path, &view)?;
        Ok(view.len())
    }

    pub fn stats(&self, log: &TripLog, filter: &TripFilter) -> JournalStats {
        JournalStats::collect(filter.apply(log))
    }
}
