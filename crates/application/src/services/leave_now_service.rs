//! Leave-now service
//!
//! Runs the full pipeline for one location: resolve the nearest stop, fetch
//! its predictions, keep trips in allowed directions, and report the one
//! leaving soonest. Every call builds its state from scratch.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use domain::{
    AllowedDirections, GeoLocation, ResolvedStop, RouteDirections, Screened, SelectionResult,
    Skipped, TripRecord,
};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::TransitDataPort;
use crate::services::{filter_trips, resolve_nearest_stop, select_soonest};

/// Default stop search radius in degrees
pub const DEFAULT_SEARCH_RADIUS: f64 = 0.01;

/// Everything a leave-now run produced
#[derive(Debug, Clone, Serialize)]
pub struct LeaveNowReport {
    /// The stop predictions were requested for
    pub stop: ResolvedStop,
    /// The soonest allowed departure, or why there is none
    pub result: SelectionResult,
    /// Records passed over in any stage
    pub skipped: Vec<Skipped>,
}

/// Service computing the soonest allowed departure near a location
pub struct LeaveNowService {
    transit: Arc<dyn TransitDataPort>,
    allowed: AllowedDirections,
    search_radius: f64,
}

impl fmt::Debug for LeaveNowService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaveNowService")
            .field("allowed", &self.allowed)
            .field("search_radius", &self.search_radius)
            .finish_non_exhaustive()
    }
}

impl LeaveNowService {
    /// Create a service with the default directions and search radius
    pub fn new(transit: Arc<dyn TransitDataPort>) -> Self {
        Self {
            transit,
            allowed: AllowedDirections::default(),
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }

    /// Restrict trips to these directions
    #[must_use]
    pub fn with_allowed_directions(mut self, allowed: AllowedDirections) -> Self {
        self.allowed = allowed;
        self
    }

    /// Search for stops within `radius` degrees
    #[must_use]
    pub const fn with_search_radius(mut self, radius: f64) -> Self {
        self.search_radius = radius;
        self
    }

    /// The directions trips must travel in
    #[must_use]
    pub const fn allowed_directions(&self) -> &AllowedDirections {
        &self.allowed
    }

    /// Resolve the stop nearest to `location`
    ///
    /// # Errors
    ///
    /// `InputUnavailable` if the search returns no usable stop, or the
    /// port's error if the search itself fails.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn nearest_stop(
        &self,
        location: &GeoLocation,
    ) -> Result<Screened<ResolvedStop>, ApplicationError> {
        let candidates = self
            .transit
            .fetch_stops_near(location, self.search_radius)
            .await?;

        debug!(count = candidates.len(), "Stop candidates received");

        let stop = resolve_nearest_stop(location, &candidates).map_err(|e| {
            warn!(%e, "No usable stop near location");
            ApplicationError::InputUnavailable(format!(
                "Unable to find a stop near {location}"
            ))
        })?;

        debug!(
            stop = %stop.value,
            parent_station = stop.value.is_parent_station(),
            "Nearest stop"
        );
        Ok(stop)
    }

    /// Predictions for `stop_id` travelling in an allowed direction
    ///
    /// Route directions are fetched once per distinct route, concurrently.
    /// A failed lookup only excludes the trips on that route.
    ///
    /// # Errors
    ///
    /// Returns the port's error if the prediction request fails.
    #[instrument(skip(self))]
    pub async fn allowed_trips(
        &self,
        stop_id: &str,
    ) -> Result<Screened<Vec<TripRecord>>, ApplicationError> {
        let trips = self.transit.fetch_predictions_for_stop(stop_id).await?;
        debug!(count = trips.len(), "Predictions received");

        if trips.is_empty() {
            return Ok(Screened::new(Vec::new(), Vec::new()));
        }

        let directions = self.route_directions(&trips).await;

        Ok(filter_trips(trips, &self.allowed, |route_id| {
            match directions.get(route_id) {
                Some(Ok(dirs)) => Ok(dirs),
                Some(Err(message)) => Err(message.clone()),
                None => Err(format!("no directions fetched for route {route_id}")),
            }
        }))
    }

    /// Fetch direction names for every distinct route among `trips`
    async fn route_directions(
        &self,
        trips: &[TripRecord],
    ) -> HashMap<String, Result<RouteDirections, String>> {
        let mut route_ids: Vec<&str> = trips.iter().filter_map(|t| t.route_id.as_deref()).collect();
        route_ids.sort_unstable();
        route_ids.dedup();

        debug!(routes = route_ids.len(), "Fetching route directions");

        let lookups = route_ids.into_iter().map(|route_id| async move {
            let result = self
                .transit
                .fetch_route_directions(route_id)
                .await
                .map_err(|e| {
                    warn!(%route_id, %e, "Route direction lookup failed");
                    e.to_string()
                });
            (route_id.to_string(), result)
        });

        join_all(lookups).await.into_iter().collect()
    }

    /// Run the pipeline against the current local time
    ///
    /// # Errors
    ///
    /// See [`Self::leave_now_at`].
    pub async fn leave_now(&self, location: &GeoLocation) -> Result<LeaveNowReport, ApplicationError> {
        self.leave_now_at(location, Local::now().naive_local()).await
    }

    /// Run the pipeline, measuring time remaining from `now`
    ///
    /// Finding no allowed trip is a normal outcome reported in
    /// [`LeaveNowReport::result`], not an error.
    ///
    /// # Errors
    ///
    /// `InputUnavailable` when no stop can be resolved, or the port's error
    /// when the stop or prediction lookup fails.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn leave_now_at(
        &self,
        location: &GeoLocation,
        now: NaiveDateTime,
    ) -> Result<LeaveNowReport, ApplicationError> {
        let Screened {
            value: stop,
            mut skipped,
        } = self.nearest_stop(location).await?;

        let Screened {
            value: trips,
            skipped: trip_skips,
        } = self.allowed_trips(&stop.id).await?;
        skipped.extend(trip_skips);

        let Screened {
            value: soonest,
            skipped: departure_skips,
        } = select_soonest(trips);
        skipped.extend(departure_skips);

        let result = match soonest {
            Some(soonest) => {
                let time_until = soonest.time_until_arrival(now);
                info!(
                    stop = %stop.id,
                    trip = soonest.trip_id().unwrap_or("-"),
                    seconds = time_until.num_seconds(),
                    "Soonest departure found"
                );
                SelectionResult::departure(soonest.trip_id().map(ToString::to_string), time_until)
            },
            None => {
                info!(stop = %stop.id, "No available trips");
                SelectionResult::no_trips()
            },
        };

        if !skipped.is_empty() {
            debug!(count = skipped.len(), "Records skipped during selection");
        }

        Ok(LeaveNowReport {
            stop,
            result,
            skipped,
        })
    }
}
