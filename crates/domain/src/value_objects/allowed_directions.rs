//! Allowed travel directions

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction labels accepted when no explicit set is configured
pub const DEFAULT_ALLOWED_DIRECTIONS: [&str; 3] = ["Outbound", "Northbound", "Southbound"];

/// The set of route direction names a trip may travel in to be considered
///
/// Matching is exact and case-sensitive, mirroring the names a transit
/// agency publishes for each route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllowedDirections(BTreeSet<String>);

impl AllowedDirections {
    /// Build a set from any collection of direction names
    pub fn new<I, S>(directions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(directions.into_iter().map(Into::into).collect())
    }

    /// Whether `direction` is one of the allowed names
    #[must_use]
    pub fn contains(&self, direction: &str) -> bool {
        self.0.contains(direction)
    }

    /// Number of allowed names
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no direction is allowed at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AllowedDirections {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DIRECTIONS)
    }
}

impl fmt::Display for AllowedDirections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iter().collect::<Vec<_>>().join(", "))
    }
}
