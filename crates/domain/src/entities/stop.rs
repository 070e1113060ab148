//! Stop entities
//!
//! A [`StopCandidate`] is a stop as reported by the stop search; a
//! [`ResolvedStop`] is the candidate chosen by the resolver, identified by
//! its parent station where it has one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A stop returned by a nearby-stop search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopCandidate {
    /// Stop identifier (platform or stop level)
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Latitude, absent when the source record was incomplete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude, absent when the source record was incomplete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Identifier of the station this stop belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_station_id: Option<String>,
}

impl StopCandidate {
    /// Create a candidate without coordinates or parent station
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            parent_station_id: None,
        }
    }

    /// Set coordinates
    #[must_use]
    pub fn with_coords(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the parent station
    #[must_use]
    pub fn with_parent_station(mut self, parent_station_id: impl Into<String>) -> Self {
        self.parent_station_id = Some(parent_station_id.into());
        self
    }

    /// Coordinates, if both are present
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoLocation::new(lat, lon)),
            _ => None,
        }
    }

    /// The id under which predictions should be requested
    ///
    /// The parent station id when there is one, otherwise the stop's own id.
    #[must_use]
    pub fn resolved_id(&self) -> &str {
        self.parent_station_id.as_deref().unwrap_or(&self.id)
    }
}

/// The stop chosen as nearest to the query location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStop {
    /// Parent station id when present, else the stop's own id
    pub id: String,
    /// Id of the stop record that was nearest
    pub stop_id: String,
    /// Human-readable stop name
    pub name: String,
    /// Coordinates of the nearest stop record
    pub location: GeoLocation,
    /// Geodesic distance from the query location in miles
    pub distance_miles: f64,
}

impl ResolvedStop {
    /// Resolve a candidate measured at `distance_miles` from the query
    #[must_use]
    pub fn from_candidate(
        candidate: &StopCandidate,
        location: GeoLocation,
        distance_miles: f64,
    ) -> Self {
        Self {
            id: candidate.resolved_id().to_string(),
            stop_id: candidate.id.clone(),
            name: candidate.name.clone(),
            location,
            distance_miles,
        }
    }

    /// Whether the resolved id came from a parent station
    #[must_use]
    pub fn is_parent_station(&self) -> bool {
        self.id != self.stop_id
    }
}

impl fmt::Display for ResolvedStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:.2} mi)", self.name, self.id, self.distance_miles)
    }
}
