use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::trip::TripRecord;

/// Aggregate figures over a set of trips, typically the current filtered
/// view. Monthly keys are `YYYY-MM`, sorted ascending by the map order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct JournalStats {
    pub trip_count: usize,
    pub total_km: f64,
    pub total_minutes: u64,
    pub monthly_km: BTreeMap<String, f64>,
}

impl JournalStats {
    pub fn collect<'a>(trips: impl IntoIterator<Item = &'a TripRecord>) -> Self {
        let mut stats = JournalStats::default();
        for trip in trips {
            stats.trip_count += 1;
            stats.total_km += trip.distance_km;
            stats.total_minutes += u64::from(trip.duration_minutes);
            let month = trip.date.format("%Y-%m").to_string();
            *stats.monthly_km.entry(month).or_default() += trip.distance_km;
        }
        stats
    }
}
