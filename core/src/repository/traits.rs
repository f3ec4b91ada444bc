use anyhow::Result;

use crate::store::TripLog;

pub trait JournalRepository {
    fn load(&self) -> Result<TripLog>;
    fn save(&self, log: &TripLog) -> Result<()>;
}

/// Optional secondary copy of the journal, pushed after each successful
/// local save. A push failure must never fail the save; callers downgrade
/// it to a warning.
pub trait JournalMirror {
    fn push(&self, log: &TripLog) -> Result<()>;
    /// Human-readable destination, for warning messages.
    fn describe(&self) -> String;
}
