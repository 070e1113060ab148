//! Trip predictions and route direction tables

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::DepartureTime;

/// A predicted trip calling at a stop
///
/// Every field but `id` is optional: incomplete prediction records are kept
/// so the pipeline can skip them with a reason instead of failing the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Prediction identifier
    pub id: String,
    /// Route this trip runs on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,
    /// Index into the route's direction names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction_index: Option<usize>,
    /// Departure timestamp as published, including its UTC offset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    /// External trip reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_ref_id: Option<String>,
}

impl TripRecord {
    /// Create a record carrying only its id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            route_id: None,
            direction_index: None,
            departure_time: None,
            trip_ref_id: None,
        }
    }

    /// Set route and direction
    #[must_use]
    pub fn with_route(mut self, route_id: impl Into<String>, direction_index: usize) -> Self {
        self.route_id = Some(route_id.into());
        self.direction_index = Some(direction_index);
        self
    }

    /// Set the departure timestamp
    #[must_use]
    pub fn with_departure_time(mut self, departure_time: impl Into<String>) -> Self {
        self.departure_time = Some(departure_time.into());
        self
    }

    /// Set the external trip reference
    #[must_use]
    pub fn with_trip_ref(mut self, trip_ref_id: impl Into<String>) -> Self {
        self.trip_ref_id = Some(trip_ref_id.into());
        self
    }

    /// Parse the departure timestamp
    ///
    /// Returns `None` when the record has no departure time.
    pub fn departure(&self) -> Option<Result<DepartureTime, DomainError>> {
        self.departure_time.as_deref().map(DepartureTime::parse)
    }

    /// The external trip reference id, if the record links to a trip
    #[must_use]
    pub fn trip_id(&self) -> Option<&str> {
        self.trip_ref_id.as_deref()
    }
}

/// Direction names of a route, indexed by a trip's `direction_index`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteDirections(Vec<String>);

impl RouteDirections {
    /// Build from the ordered direction names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Direction name at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Number of directions
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the route publishes no directions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
