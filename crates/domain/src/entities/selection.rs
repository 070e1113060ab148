//! Terminal result of the leave-now pipeline

use chrono::TimeDelta;
use serde::{Serialize, Serializer};

/// Message returned when no allowed trip departs from the resolved stop
pub const NO_TRIPS_MESSAGE: &str = "No available trips at this time";

/// Outcome of a leave-now request
///
/// Serializes to either `{"trip_id": ..., "time_until_arrival": "0:05:00"}`
/// or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SelectionResult {
    /// The soonest allowed departure
    Departure {
        /// External trip reference, absent when the prediction had no trip link
        trip_id: Option<String>,
        /// Signed time remaining until departure
        #[serde(serialize_with = "serialize_signed_duration")]
        time_until_arrival: TimeDelta,
    },
    /// No trip could be offered
    Unavailable {
        /// Human-readable reason
        error: String,
    },
}

impl SelectionResult {
    /// A departure result
    #[must_use]
    pub const fn departure(trip_id: Option<String>, time_until_arrival: TimeDelta) -> Self {
        Self::Departure {
            trip_id,
            time_until_arrival,
        }
    }

    /// The "no trips" result
    #[must_use]
    pub fn no_trips() -> Self {
        Self::Unavailable {
            error: NO_TRIPS_MESSAGE.to_string(),
        }
    }

    /// Whether a departure was found
    #[must_use]
    pub const fn is_departure(&self) -> bool {
        matches!(self, Self::Departure { .. })
    }
}

/// Format a signed duration as `H:MM:SS`
///
/// Durations of a day or more are prefixed with `N day(s), `; negative
/// durations get a leading `-`. Sub-second precision is truncated.
#[must_use]
pub fn format_signed_duration(delta: TimeDelta) -> String {
    let total = delta.num_seconds().unsigned_abs();
    let sign = if delta.num_seconds() < 0 { "-" } else { "" };

    let days = total / 86_400;
    let rem = total % 86_400;
    let (hours, minutes, seconds) = (rem / 3600, rem % 3600 / 60, rem % 60);

    match days {
        0 => format!("{sign}{hours}:{minutes:02}:{seconds:02}"),
        1 => format!("{sign}1 day, {hours}:{minutes:02}:{seconds:02}"),
        n => format!("{sign}{n} days, {hours}:{minutes:02}:{seconds:02}"),
    }
}

fn serialize_signed_duration<S>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_signed_duration(*delta))
}
