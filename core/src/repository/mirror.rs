use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::repository::file::write_trips;
use crate::repository::traits::JournalMirror;
use crate::store::TripLog;

/// Mirror that copies the journal to a fixed secondary path on every save,
/// e.g. a synced folder. Stands in for a remote backend behind the
/// [`JournalMirror`] seam; push failures are reported by the service as
/// warnings and never block the local save.
pub struct FileMirror {
    target: PathBuf,
}

impl FileMirror {
    pub fn new(target: PathBuf) -> Self {
        FileMirror { target }
    }
}

impl JournalMirror for FileMirror {
    fn push(&self, log: &TripLog) -> Result<()> {
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        write_trips(&self.target, log.records())
    }

    fn describe(&self) -> String {
        self.target.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::trip::TripRecord;
    use crate::repository::file::read_trips;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    #[test]
    fn test_push_writes_canonical_copy() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("backup").join("korjournal.csv");
        let mirror = FileMirror::new(target.clone());

        let log = TripLog::from_records(vec![TripRecord::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            "Home".to_string(),
            "Office".to_string(),
            12.5,
            "Commute".to_string(),
        )]);
        mirror.push(&log).unwrap();

        let copy = read_trips(&target).unwrap();
        assert_eq!(copy.trips.len(), 1);
        assert!(copy.trips[0].same_fields(&log.records()[0]));
    }
}
