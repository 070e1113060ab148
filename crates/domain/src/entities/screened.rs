//! Per-record outcome tracking
//!
//! Pipeline stages never fail a batch because one record is incomplete.
//! Instead they return a [`Screened`] value carrying the stage output along
//! with every record that was passed over and why.

use std::fmt;

use serde::Serialize;

/// Why a record was passed over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Stop has no usable latitude/longitude
    MissingCoordinates,
    /// Distance to the stop could not be computed
    NonFiniteDistance,
    /// Trip has no route
    MissingRoute,
    /// Trip has no direction index
    MissingDirectionIndex,
    /// Route direction names could not be fetched
    DirectionLookupFailed { message: String },
    /// Direction index does not exist on the route
    DirectionIndexOutOfRange { index: usize, available: usize },
    /// Trip has no departure time
    MissingDepartureTime,
    /// Departure time could not be parsed
    InvalidDepartureTime { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCoordinates => write!(f, "missing coordinates"),
            Self::NonFiniteDistance => write!(f, "distance could not be computed"),
            Self::MissingRoute => write!(f, "missing route"),
            Self::MissingDirectionIndex => write!(f, "missing direction index"),
            Self::DirectionLookupFailed { message } => {
                write!(f, "direction lookup failed: {message}")
            },
            Self::DirectionIndexOutOfRange { index, available } => {
                write!(f, "direction index {index} out of range ({available} directions)")
            },
            Self::MissingDepartureTime => write!(f, "missing departure time"),
            Self::InvalidDepartureTime { message } => {
                write!(f, "invalid departure time: {message}")
            },
        }
    }
}

/// A record that was passed over
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    /// Id of the skipped record
    pub record_id: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

impl Skipped {
    /// Create a skip entry
    #[must_use]
    pub fn new(record_id: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            record_id: record_id.into(),
            reason,
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record_id, self.reason)
    }
}

/// Output of a pipeline stage plus the records it skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Screened<T> {
    /// Stage output
    pub value: T,
    /// Skipped records, in encounter order
    pub skipped: Vec<Skipped>,
}

impl<T> Screened<T> {
    /// Wrap a stage output
    #[must_use]
    pub const fn new(value: T, skipped: Vec<Skipped>) -> Self {
        Self { value, skipped }
    }

    /// Number of skipped records
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}
