//! MBTA adapter - Implements TransitDataPort using integration_mbta

use std::fmt;
use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::TransitDataPort;
use async_trait::async_trait;
use domain::{GeoLocation, RouteDirections, StopCandidate, TripRecord};
use integration_mbta::{MbtaClient, MbtaConfig, MbtaError, MbtaV3Client, Prediction, Stop};
use tracing::{debug, instrument};

/// Adapter exposing the MBTA V3 API as a transit data source
pub struct MbtaTransitAdapter {
    client: Arc<dyn MbtaClient>,
}

impl fmt::Debug for MbtaTransitAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MbtaTransitAdapter")
            .field("client", &"MbtaClient")
            .finish()
    }
}

impl MbtaTransitAdapter {
    /// Wrap an existing MBTA client
    pub fn new(client: Arc<dyn MbtaClient>) -> Self {
        Self { client }
    }

    /// Build an adapter backed by [`MbtaV3Client`]
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the client cannot be built from `config`.
    pub fn from_config(config: &MbtaConfig) -> Result<Self, ApplicationError> {
        let client = MbtaV3Client::new(config).map_err(|e| map_error("MBTA client", e))?;
        Ok(Self::new(Arc::new(client)))
    }

    fn convert_stop(stop: Stop) -> StopCandidate {
        StopCandidate {
            id: stop.id,
            name: stop.name,
            latitude: stop.latitude,
            longitude: stop.longitude,
            parent_station_id: stop.parent_station_id,
        }
    }

    fn convert_prediction(prediction: Prediction) -> TripRecord {
        TripRecord {
            id: prediction.id,
            route_id: prediction.route_id,
            direction_index: prediction.direction_id,
            departure_time: prediction.departure_time,
            trip_ref_id: prediction.trip_id,
        }
    }
}

/// Map an MBTA error onto the application's error kinds
fn map_error(operation: &str, error: MbtaError) -> ApplicationError {
    match error {
        MbtaError::ConfigurationError(msg) => {
            ApplicationError::Configuration(format!("{operation}: {msg}"))
        },
        other => ApplicationError::ExternalService(format!("{operation} failed: {other}")),
    }
}

#[async_trait]
impl TransitDataPort for MbtaTransitAdapter {
    #[instrument(skip(self), fields(location = %location))]
    async fn fetch_stops_near(
        &self,
        location: &GeoLocation,
        radius: f64,
    ) -> Result<Vec<StopCandidate>, ApplicationError> {
        let stops = self
            .client
            .stops_near(location.latitude(), location.longitude(), radius)
            .await
            .map_err(|e| match e {
                MbtaError::Api(msg) => {
                    ApplicationError::InputUnavailable(format!("Stop search returned errors: {msg}"))
                },
                other => map_error("Stop search", other),
            })?;

        debug!(count = stops.len(), "Fetched stop candidates");
        Ok(stops.into_iter().map(Self::convert_stop).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_predictions_for_stop(
        &self,
        stop_id: &str,
    ) -> Result<Vec<TripRecord>, ApplicationError> {
        let predictions = self
            .client
            .predictions_for_stop(stop_id)
            .await
            .map_err(|e| map_error("Prediction lookup", e))?;

        Ok(predictions
            .into_iter()
            .map(Self::convert_prediction)
            .collect())
    }

    #[instrument(skip(self))]
    async fn fetch_route_directions(
        &self,
        route_id: &str,
    ) -> Result<RouteDirections, ApplicationError> {
        let route = self
            .client
            .route(route_id)
            .await
            .map_err(|e| map_error("Route lookup", e))?;

        Ok(RouteDirections::new(route.direction_names))
    }
}
