//! Transit data port
//!
//! Defines the three lookups the leave-now pipeline needs from a transit
//! data provider. Adapters in the infrastructure layer implement this port
//! on top of a concrete API.

use async_trait::async_trait;
use domain::{GeoLocation, RouteDirections, StopCandidate, TripRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for transit stop, prediction, and route lookups
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitDataPort: Send + Sync {
    /// Stops within `radius` degrees of `location`
    async fn fetch_stops_near(
        &self,
        location: &GeoLocation,
        radius: f64,
    ) -> Result<Vec<StopCandidate>, ApplicationError>;

    /// Trip predictions for a stop or station
    ///
    /// An empty list is a valid answer, not an error.
    async fn fetch_predictions_for_stop(
        &self,
        stop_id: &str,
    ) -> Result<Vec<TripRecord>, ApplicationError>;

    /// Direction names of a route, ordered by direction index
    async fn fetch_route_directions(
        &self,
        route_id: &str,
    ) -> Result<RouteDirections, ApplicationError>;
}
