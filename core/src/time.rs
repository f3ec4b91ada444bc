use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

use crate::normalize::NormalizeError;

pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const CLOCK_FORMAT: &str = "%H:%M";

/// Parses a 24-hour `HH:MM` clock string. Spreadsheet exports sometimes carry
/// seconds (`HH:MM:SS`); those are accepted and truncated to minute resolution.
pub fn parse_clock(input: &str) -> Result<NaiveTime, NormalizeError> {
    let input = input.trim();
    let parsed = NaiveTime::parse_from_str(input, CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| NormalizeError::InvalidClock(input.to_string()))?;
    // Drop any seconds so stored times are always minute-resolution.
    Ok(parsed.with_second(0).unwrap_or(parsed))
}

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_day(input: &str) -> Result<NaiveDate, NormalizeError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DAY_FORMAT)
        .map_err(|_| NormalizeError::InvalidDay(input.to_string()))
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Travel duration in whole minutes between two times of day.
///
/// An end time earlier than the start time is treated as spanning into the
/// next calendar day, so the 24h wrap is added before subtracting. The result
/// is never negative.
pub fn travel_minutes(start: NaiveTime, end: NaiveTime) -> u32 {
    let mut diff = end.signed_duration_since(start);
    if diff < Duration::zero() {
        diff = diff + Duration::hours(24);
    }
    diff.num_minutes().max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_clock_valid() {
        assert_eq!(parse_clock("08:30").unwrap(), clock(8, 30));
        assert_eq!(parse_clock(" 23:05 ").unwrap(), clock(23, 5));
    }

    #[test]
    fn test_parse_clock_with_seconds_truncates() {
        assert_eq!(parse_clock("08:30:45").unwrap(), clock(8, 30));
    }

    #[test]
    fn test_parse_clock_invalid() {
        assert!(parse_clock("8.30").is_err());
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("").is_err());
        assert!(parse_clock("half past eight").is_err());
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_day("01/06/2024").is_err());
        assert!(parse_day("2024-13-01").is_err());
    }

    #[test]
    fn test_travel_minutes_same_day() {
        assert_eq!(travel_minutes(clock(8, 0), clock(8, 45)), 45);
        assert_eq!(travel_minutes(clock(0, 30), clock(1, 7)), 37);
    }

    #[test]
    fn test_travel_minutes_equal_times() {
        assert_eq!(travel_minutes(clock(12, 0), clock(12, 0)), 0);
    }

    #[test]
    fn test_travel_minutes_wraps_past_midnight() {
        // End before start means the trip ran into the next day.
        assert_eq!(travel_minutes(clock(23, 50), clock(0, 10)), 20);
        assert_eq!(travel_minutes(clock(22, 0), clock(6, 0)), 480);
    }

    #[test]
    fn test_format_round() {
        assert_eq!(format_clock(clock(7, 5)), "07:05");
        assert_eq!(
            format_day(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            "2024-06-01"
        );
    }
}
