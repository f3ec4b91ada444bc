use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::trip::TripRecord;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("index {index} out of bounds, log has {len} records")]
    OutOfBounds { index: usize, len: usize },
    #[error("no trip with id {0}")]
    UnknownId(Uuid),
}

/// In-memory trip log: an ordered sequence of records, newest appended last.
/// The log is the single source of truth during a session; the persisted
/// file is a durable mirror overwritten wholesale on each save.
///
/// Handlers take the current log and return an updated one, so there is no
/// ambient session state to lose track of.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TripLog {
    records: Vec<TripRecord>,
}

impl TripLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TripRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn append(&mut self, record: TripRecord) {
        self.records.push(record);
    }

    pub fn replace_all(&mut self, records: Vec<TripRecord>) {
        self.records = records;
    }

    pub fn update_at(&mut self, index: usize, record: TripRecord) -> Result<(), StoreError> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(StoreError::OutOfBounds { index, len })?;
        *slot = record;
        Ok(())
    }

    pub fn delete_at(&mut self, index: usize) -> Result<TripRecord, StoreError> {
        if index >= self.records.len() {
            return Err(StoreError::OutOfBounds {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&TripRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Replaces the record whose id matches `record.id`.
    pub fn update(&mut self, record: TripRecord) -> Result<(), StoreError> {
        let pos = self
            .position_of(record.id)
            .ok_or(StoreError::UnknownId(record.id))?;
        self.records[pos] = record;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<TripRecord, StoreError> {
        let pos = self.position_of(id).ok_or(StoreError::UnknownId(id))?;
        Ok(self.records.remove(pos))
    }

    /// First record satisfying the predicate, in insertion order.
    pub fn find_matching<P>(&self, predicate: P) -> Option<&TripRecord>
    where
        P: Fn(&TripRecord) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }
}

/// Filtered view over a log: optional date range plus a case-insensitive
/// purpose substring. A view is recomputed on every use, so its row numbers
/// are never valid positions in the backing log; selections resolve back to
/// the store through the record id (`id_at`), not through the view index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub purpose: Option<String>,
}

impl TripFilter {
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.purpose.is_none()
    }

    pub fn matches(&self, record: &TripRecord) -> bool {
        if let Some(from) = self.from {
            if record.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.date > to {
                return false;
            }
        }
        if let Some(purpose) = &self.purpose {
            if !record
                .purpose
                .to_lowercase()
                .contains(&purpose.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, log: &'a TripLog) -> Vec<&'a TripRecord> {
        log.iter().filter(|r| self.matches(r)).collect()
    }

    /// Id of the record at a 0-based row of this view.
    pub fn id_at(&self, log: &TripLog, row: usize) -> Option<Uuid> {
        self.apply(log).get(row).map(|r| r.id)
    }
}
