use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::model::trip::TripRecord;
use crate::time::{parse_clock, parse_day, travel_minutes};

#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("invalid time '{0}', expected HH:MM")]
    InvalidClock(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDay(String),
    #[error("distance must be a non-negative number, got {0}")]
    InvalidDistance(f64),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// A date as it arrives from one of the input sources: an already-typed
/// value (interactive input) or a text cell (file import, templates).
#[derive(Debug, Clone, PartialEq)]
pub enum DayField {
    Value(NaiveDate),
    Text(String),
}

impl DayField {
    fn resolve(&self) -> Result<NaiveDate, NormalizeError> {
        match self {
            DayField::Value(date) => Ok(*date),
            DayField::Text(text) => parse_day(text),
        }
    }
}

impl From<NaiveDate> for DayField {
    fn from(date: NaiveDate) -> Self {
        DayField::Value(date)
    }
}

/// A time-of-day in either typed or `HH:MM` text form.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockField {
    Value(NaiveTime),
    Text(String),
}

impl ClockField {
    fn resolve(&self) -> Result<NaiveTime, NormalizeError> {
        match self {
            ClockField::Value(time) => Ok(*time),
            ClockField::Text(text) => parse_clock(text),
        }
    }
}

impl From<NaiveTime> for ClockField {
    fn from(time: NaiveTime) -> Self {
        ClockField::Value(time)
    }
}

/// Raw trip fields before normalization. Callers build this the same way
/// whether the data came from interactive input, an imported file row or a
/// quick-add template; the engine does not care which.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub date: DayField,
    pub start_time: ClockField,
    pub end_time: ClockField,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub purpose: String,
}

/// Strict normalization for user-entered drafts: every field must parse and
/// validate, otherwise no record is created. Pure, no side effects.
pub fn normalize(draft: TripDraft) -> Result<TripRecord, NormalizeError> {
    let date = draft.date.resolve()?;
    let start_time = draft.start_time.resolve()?;
    let end_time = draft.end_time.resolve()?;

    let origin = required_text(draft.origin, "origin")?;
    let destination = required_text(draft.destination, "destination")?;
    let purpose = required_text(draft.purpose, "purpose")?;

    // `>= 0.0` is false for NaN as well, so non-numbers are rejected here too.
    if !(draft.distance_km >= 0.0) || !draft.distance_km.is_finite() {
        return Err(NormalizeError::InvalidDistance(draft.distance_km));
    }

    Ok(TripRecord::new(
        date,
        start_time,
        end_time,
        origin,
        destination,
        draft.distance_km,
        purpose,
    ))
}

/// A record produced by [`normalize_lenient`], flagged when a time cell had
/// to fall back so the import path can count and report it.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientTrip {
    pub record: TripRecord,
    /// True when a malformed time cell fell back to midnight and the
    /// duration was forced to zero.
    pub degraded_time: bool,
}

/// Lenient normalization for imported rows.
///
/// A row without a parseable date is dropped (`None`). A malformed time cell
/// degrades to midnight with a duration of zero minutes instead of rejecting
/// the row; this masks bad data but keeps legacy files loadable, so the
/// fallback is flagged on the result for the caller to report. Text fields
/// are trimmed and may be empty. Negative or non-finite distances clamp to
/// zero.
pub fn normalize_lenient(draft: TripDraft) -> Option<LenientTrip> {
    let date = draft.date.resolve().ok()?;

    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default();
    let (start_time, start_ok) = match draft.start_time.resolve() {
        Ok(time) => (time, true),
        Err(_) => (midnight, false),
    };
    let (end_time, end_ok) = match draft.end_time.resolve() {
        Ok(time) => (time, true),
        Err(_) => (midnight, false),
    };

    let distance_km = if draft.distance_km.is_finite() {
        draft.distance_km.max(0.0)
    } else {
        0.0
    };

    let mut record = TripRecord::new(
        date,
        start_time,
        end_time,
        draft.origin.trim().to_string(),
        draft.destination.trim().to_string(),
        distance_km,
        draft.purpose.trim().to_string(),
    );
    let degraded_time = !start_ok || !end_ok;
    if degraded_time {
        record.duration_minutes = 0;
    }
    Some(LenientTrip {
        record,
        degraded_time,
    })
}

fn required_text(value: String, field: &'static str) -> Result<String, NormalizeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

impl TripDraft {
    /// Draft with every field in text form, as read from a tabular file.
    pub fn from_text(
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        distance_km: f64,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            date: DayField::Text(date.into()),
            start_time: ClockField::Text(start_time.into()),
            end_time: ClockField::Text(end_time.into()),
            origin: origin.into(),
            destination: destination.into(),
            distance_km,
            purpose: purpose.into(),
        }
    }

    /// Draft seeded from an existing record, used when editing: the caller
    /// overrides individual fields before re-normalizing.
    pub fn from_record(record: &TripRecord) -> Self {
        Self {
            date: DayField::Value(record.date),
            start_time: ClockField::Value(record.start_time),
            end_time: ClockField::Value(record.end_time),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            distance_km: record.distance_km,
            purpose: record.purpose.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TripDraft {
        TripDraft::from_text(
            "2024-06-01",
            "08:00",
            "08:45",
            "Home",
            "Office",
            12.5,
            "Commute",
        )
    }

    #[test]
    fn test_normalize_text_fields() {
        let trip = normalize(draft()).unwrap();
        assert_eq!(trip.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(trip.duration_minutes, 45);
        assert_eq!(trip.origin, "Home");
        assert_eq!(trip.distance_km, 12.5);
    }

    #[test]
    fn test_normalize_typed_fields() {
        let mut d = draft();
        d.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().into();
        d.start_time = NaiveTime::from_hms_opt(8, 0, 0).unwrap().into();
        d.end_time = NaiveTime::from_hms_opt(8, 45, 0).unwrap().into();
        let trip = normalize(d).unwrap();
        assert_eq!(trip.duration_minutes, 45);
    }

    #[test]
    fn test_normalize_rejects_bad_time() {
        let mut d = draft();
        d.end_time = ClockField::Text("quarter to nine".to_string());
        assert_eq!(
            normalize(d).unwrap_err(),
            NormalizeError::InvalidClock("quarter to nine".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_negative_distance() {
        let mut d = draft();
        d.distance_km = -3.0;
        assert_eq!(
            normalize(d).unwrap_err(),
            NormalizeError::InvalidDistance(-3.0)
        );
    }

    #[test]
    fn test_normalize_rejects_nan_distance() {
        let mut d = draft();
        d.distance_km = f64::NAN;
        assert!(matches!(
            normalize(d).unwrap_err(),
            NormalizeError::InvalidDistance(_)
        ));
    }

    #[test]
    fn test_normalize_rejects_empty_required_text() {
        let mut d = draft();
        d.origin = "   ".to_string();
        assert_eq!(
            normalize(d).unwrap_err(),
            NormalizeError::EmptyField("origin")
        );
    }

    #[test]
    fn test_normalize_trims_text() {
        let mut d = draft();
        d.purpose = "  Commute  ".to_string();
        assert_eq!(normalize(d).unwrap().purpose, "Commute");
    }

    #[test]
    fn test_lenient_drops_row_without_date() {
        let mut d = draft();
        d.date = DayField::Text("not a date".to_string());
        assert!(normalize_lenient(d).is_none());
    }

    #[test]
    fn test_lenient_bad_time_defaults_duration_to_zero_and_flags_it() {
        let mut d = draft();
        d.start_time = ClockField::Text("??".to_string());
        let lenient = normalize_lenient(d).unwrap();
        assert!(lenient.degraded_time);
        assert_eq!(
            lenient.record.start_time,
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(lenient.record.duration_minutes, 0);
    }

    #[test]
    fn test_lenient_allows_empty_text_and_clamps_distance() {
        let mut d = draft();
        d.origin = String::new();
        d.distance_km = -1.0;
        let lenient = normalize_lenient(d).unwrap();
        assert!(!lenient.degraded_time);
        assert_eq!(lenient.record.origin, "");
        assert_eq!(lenient.record.distance_km, 0.0);
        assert_eq!(lenient.record.duration_minutes, 45);
    }
}
