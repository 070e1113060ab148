//! Departure timestamp value object
//!
//! Predictions carry timestamps such as `2024-01-01T09:30:00-04:00`. The
//! offset suffix is dropped and the wall-clock part kept as-is: no
//! conversion to UTC or to the caller's zone takes place. Comparisons and
//! differences are therefore only meaningful against a "now" taken in the
//! same local frame.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Layout of the wall-clock part of a prediction timestamp
const WALL_CLOCK_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A scheduled departure, expressed as wall-clock time with the offset discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DepartureTime(NaiveDateTime);

impl DepartureTime {
    /// Parse a prediction timestamp, discarding any UTC offset
    ///
    /// Accepts RFC 3339 timestamps with an offset (the offset is ignored,
    /// not applied) and bare `YYYY-MM-DDTHH:MM:SS` values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if neither form matches.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(with_offset.naive_local()));
        }
        NaiveDateTime::parse_from_str(raw, WALL_CLOCK_FORMAT)
            .map(Self)
            .map_err(|e| DomainError::InvalidDateTime(format!("{raw}: {e}")))
    }

    /// Wrap an already-local wall-clock time
    #[must_use]
    pub const fn from_wall_clock(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// The wall-clock value
    #[must_use]
    pub const fn wall_clock(&self) -> NaiveDateTime {
        self.0
    }

    /// Signed time remaining from `now` until this departure
    ///
    /// Negative when the departure has already passed.
    #[must_use]
    pub fn until(&self, now: NaiveDateTime) -> TimeDelta {
        self.0 - now
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WALL_CLOCK_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn offset_is_discarded_not_applied() {
        let t = DepartureTime::parse("2024-01-01T09:30:00-04:00").unwrap();
        assert_eq!(t.wall_clock(), at(9, 30, 0));
    }

    #[test]
    fn other_offsets_are_discarded_too() {
        let t = DepartureTime::parse("2024-01-01T09:30:00-05:00").unwrap();
        assert_eq!(t.wall_clock(), at(9, 30, 0));

        let t = DepartureTime::parse("2024-01-01T09:30:00Z").unwrap();
        assert_eq!(t.wall_clock(), at(9, 30, 0));
    }

    #[test]
    fn bare_wall_clock_is_accepted() {
        let t = DepartureTime::parse("2024-01-01T10:00:00").unwrap();
        assert_eq!(t.wall_clock(), at(10, 0, 0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let t = DepartureTime::parse("  2024-01-01T10:00:00-04:00\n").unwrap();
        assert_eq!(t.wall_clock(), at(10, 0, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = DepartureTime::parse("soon").unwrap_err();
        assert!(matches!(err, DomainError::InvalidDateTime(_)));
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn ordering_follows_wall_clock() {
        let early = DepartureTime::parse("2024-01-01T09:30:00-04:00").unwrap();
        let late = DepartureTime::parse("2024-01-01T10:00:00-04:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn until_is_signed() {
        let t = DepartureTime::from_wall_clock(at(10, 0, 0));
        assert_eq!(t.until(at(9, 55, 0)), TimeDelta::minutes(5));
        assert_eq!(t.until(at(10, 2, 0)), TimeDelta::minutes(-2));
    }

    #[test]
    fn display_omits_offset() {
        let t = DepartureTime::parse("2024-01-01T09:30:00-04:00").unwrap();
        assert_eq!(t.to_string(), "2024-01-01T09:30:00");
    }
}
