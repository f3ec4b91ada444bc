use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::{ClockField, DayField, TripDraft};

/// Quick-add template: a favourite journey with fixed times and distance,
/// applied to a chosen date. Times are kept as `HH:MM` strings so the
/// template file stays hand-editable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripTemplate {
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub start_time: String,
    pub end_time: String,
    pub distance_km: f64,
    pub purpose: String,
}

impl TripTemplate {
    /// Seed pair written when no template file exists yet: the commute in
    /// both directions. Meant to be edited to the user's actual route.
    pub fn defaults() -> Vec<TripTemplate> {
        vec![
            TripTemplate {
                name: "Till jobbet".to_string(),
                origin: "Hemma".to_string(),
                destination: "Jobbet".to_string(),
                start_time: "07:30".to_string(),
                end_time: "08:07".to_string(),
                distance_km: 45.7,
                purpose: "Resa till jobbet".to_string(),
            },
            TripTemplate {
                name: "Från jobbet".to_string(),
                origin: "Jobbet".to_string(),
                destination: "Hemma".to_string(),
                start_time: "16:30".to_string(),
                end_time: "17:07".to_string(),
                distance_km: 45.7,
                purpose: "Resa hem från jobbet".to_string(),
            },
        ]
    }

    /// Materializes the template into a draft for the given date.
    pub fn draft_for(&self, date: NaiveDate) -> TripDraft {
        TripDraft {
            date: DayField::Value(date),
            start_time: ClockField::Text(self.start_time.clone()),
            end_time: ClockField::Text(self.end_time.clone()),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            distance_km: self.distance_km,
            purpose: self.purpose.clone(),
        }
    }
}
