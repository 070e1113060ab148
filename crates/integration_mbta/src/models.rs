//! MBTA data models
//!
//! Typed representations of the stop, prediction and route resources the
//! MBTA V3 API returns. Attributes the API may omit are optional; deciding
//! what to do with incomplete records is left to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stop or platform returned by the stop search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    /// MBTA stop ID (e.g. `70080`)
    pub id: String,
    /// Human-readable name, empty when the API omits it
    pub name: String,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
    /// ID of the parent station (e.g. `place-sstat`), if any
    pub parent_station_id: Option<String>,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent_station_id {
            Some(parent) => write!(f, "{} ({} in {parent})", self.name, self.id),
            None => write!(f, "{} ({})", self.name, self.id),
        }
    }
}

/// A real-time departure prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    /// Prediction ID
    pub id: String,
    /// Route the predicted trip runs on
    pub route_id: Option<String>,
    /// Index into the route's direction names
    pub direction_id: Option<usize>,
    /// Departure time as published, ISO-8601 with offset
    pub departure_time: Option<String>,
    /// Trip the prediction belongs to
    pub trip_id: Option<String>,
}

/// A route with its direction names
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    /// Route ID (e.g. `Red`, `1`)
    pub id: String,
    /// Direction names indexed by `direction_id` (e.g. `["South", "North"]`)
    pub direction_names: Vec<String>,
}
