use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::travel_minutes;

/// One logged journey.
///
/// `id` is a session-scoped synthetic identifier: the persisted tabular file
/// carries no ID column, so a fresh one is assigned whenever a record is
/// created or loaded. Edits and deletes resolve their target through this ID,
/// which lets two records with identical visible fields coexist and be
/// edited independently.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Derived from `start_time`/`end_time`, never trusted from input.
    pub duration_minutes: u32,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub purpose: String,
}

impl TripRecord {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        origin: String,
        destination: String,
        distance_km: f64,
        purpose: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            start_time,
            end_time,
            duration_minutes: travel_minutes(start_time, end_time),
            origin,
            destination,
            distance_km,
            purpose,
        }
    }

    /// Field-for-field equality ignoring the session-scoped `id`. Used by
    /// round-trip checks since IDs are reassigned on load.
    pub fn same_fields(&self, other: &TripRecord) -> bool {
        self.date == other.date
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.duration_minutes == other.duration_minutes
            && self.origin == other.origin
            && self.destination == other.destination
            && self.distance_km == other.distance_km
            && self.purpose == other.purpose
    }
}
