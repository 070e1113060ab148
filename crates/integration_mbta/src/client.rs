//! MBTA V3 API client
//!
//! Provides stop search, per-stop predictions and route lookup using the
//! public [api-v3.mbta.com](https://api-v3.mbta.com) JSON:API service.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace, warn};

use crate::config::MbtaConfig;
use crate::error::MbtaError;
use crate::models::{Prediction, Route, Stop};

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-api-key";

/// Maximum number of routes held in the direction cache
const ROUTE_CACHE_CAPACITY: u64 = 500;

/// Trait for MBTA service clients
#[async_trait]
pub trait MbtaClient: Send + Sync {
    /// Find stops within `radius` degrees of a set of coordinates
    async fn stops_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<Stop>, MbtaError>;

    /// Fetch current predictions for a stop or parent station
    async fn predictions_for_stop(&self, stop_id: &str) -> Result<Vec<Prediction>, MbtaError>;

    /// Fetch a route, including its direction names
    async fn route(&self, route_id: &str) -> Result<Route, MbtaError>;
}

/// Client for the MBTA V3 API
#[derive(Debug)]
pub struct MbtaV3Client {
    client: Client,
    config: MbtaConfig,
    routes: Option<Cache<String, Route>>,
}

impl MbtaV3Client {
    /// Create a new MBTA client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &MbtaConfig) -> Result<Self, MbtaError> {
        config.validate().map_err(MbtaError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("NextRide/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MbtaError::ConnectionFailed(e.to_string()))?;

        let routes = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(ROUTE_CACHE_CAPACITY)
                .time_to_live(Duration::from_secs(
                    u64::from(config.cache_ttl_minutes) * 60,
                ))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            routes,
        })
    }

    /// GET a JSON:API document and return its `data` member
    async fn get_data<D: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<D, MbtaError> {
        let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!(%url, "Requesting MBTA resource");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                MbtaError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                MbtaError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MbtaError::ParseError(e.to_string()))?;

        Self::parse_document(status, &body)
    }

    /// Interpret a response body according to its status
    fn parse_document<D: DeserializeOwned>(status: StatusCode, body: &str) -> Result<D, MbtaError> {
        if !status.is_success() {
            let details = serde_json::from_str::<RawDocument<serde_json::Value>>(body)
                .ok()
                .and_then(|doc| doc.errors)
                .map_or_else(|| format!("HTTP {status}"), |errors| describe_errors(&errors));

            return Err(if status == StatusCode::NOT_FOUND {
                MbtaError::NotFound(details)
            } else {
                MbtaError::RequestFailed(details)
            });
        }

        let doc: RawDocument<D> =
            serde_json::from_str(body).map_err(|e| MbtaError::ParseError(e.to_string()))?;

        if let Some(errors) = doc.errors {
            warn!(count = errors.len(), "MBTA response carried errors");
            return Err(MbtaError::Api(describe_errors(&errors)));
        }

        doc.data
            .ok_or_else(|| MbtaError::ParseError("response has no data member".to_string()))
    }

    /// Deserialize each resource of a collection on its own
    ///
    /// A resource that does not fit `R` is replaced by `bare(id)`, so it
    /// reaches the pipeline with no attributes and is skipped there. One
    /// without an id cannot be reported and is dropped.
    fn collect_resources<R: DeserializeOwned>(
        values: Vec<serde_json::Value>,
        bare: impl Fn(String) -> R,
    ) -> Vec<R> {
        values
            .into_iter()
            .filter_map(|value| {
                let id = value
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .map(ToString::to_string);

                match (serde_json::from_value(value), id) {
                    (Ok(resource), _) => Some(resource),
                    (Err(e), Some(id)) => {
                        warn!(%id, error = %e, "Malformed resource, attributes ignored");
                        Some(bare(id))
                    },
                    (Err(e), None) => {
                        warn!(error = %e, "Malformed resource without id dropped");
                        None
                    },
                }
            })
            .collect()
    }

    fn convert_stop(raw: RawStop) -> Stop {
        let attributes = raw.attributes.unwrap_or_default();
        let parent_station_id = raw
            .relationships
            .and_then(|r| r.parent_station)
            .and_then(RawRelationship::into_id);

        Stop {
            id: raw.id,
            name: attributes.name.unwrap_or_default(),
            latitude: attributes.latitude,
            longitude: attributes.longitude,
            parent_station_id,
        }
    }

    fn convert_prediction(raw: RawPrediction) -> Prediction {
        let attributes = raw.attributes.unwrap_or_default();
        let relationships = raw.relationships.unwrap_or_default();

        Prediction {
            id: raw.id,
            route_id: relationships.route.and_then(RawRelationship::into_id),
            direction_id: attributes
                .direction_id
                .and_then(|d| usize::try_from(d).ok()),
            departure_time: attributes.departure_time,
            trip_id: relationships.trip.and_then(RawRelationship::into_id),
        }
    }

    fn convert_route(raw: RawRoute) -> Route {
        let attributes = raw.attributes.unwrap_or_default();
        Route {
            id: raw.id,
            direction_names: attributes
                .direction_names
                .unwrap_or_default()
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
        }
    }
}

#[async_trait]
impl MbtaClient for MbtaV3Client {
    #[instrument(skip(self))]
    async fn stops_near(
        &self,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) -> Result<Vec<Stop>, MbtaError> {
        let params = [
            ("filter[latitude]", latitude.to_string()),
            ("filter[longitude]", longitude.to_string()),
            ("filter[radius]", radius.to_string()),
        ];

        let values: Vec<serde_json::Value> = self.get_data("/stops", &params).await?;
        let raw = Self::collect_resources(values, RawStop::bare);
        debug!(count = raw.len(), "Stops found");

        let stops: Vec<Stop> = raw.into_iter().map(Self::convert_stop).collect();
        for stop in &stops {
            trace!(%stop, "Stop candidate");
        }
        Ok(stops)
    }

    #[instrument(skip(self))]
    async fn predictions_for_stop(&self, stop_id: &str) -> Result<Vec<Prediction>, MbtaError> {
        let params = [("filter[stop]", stop_id.to_string())];

        let values: Vec<serde_json::Value> = self.get_data("/predictions", &params).await?;
        let raw = Self::collect_resources(values, RawPrediction::bare);
        if raw.is_empty() {
            warn!(%stop_id, "No predictions for stop");
        }

        Ok(raw.into_iter().map(Self::convert_prediction).collect())
    }

    #[instrument(skip(self))]
    async fn route(&self, route_id: &str) -> Result<Route, MbtaError> {
        if let Some(cache) = &self.routes {
            if let Some(route) = cache.get(route_id).await {
                debug!(%route_id, "Route cache hit");
                return Ok(route);
            }
        }

        let raw: RawRoute = self.get_data(&format!("/routes/{route_id}"), &[]).await?;
        let route = Self::convert_route(raw);

        if let Some(cache) = &self.routes {
            cache.insert(route_id.to_string(), route.clone()).await;
        }

        Ok(route)
    }
}

/// Flatten JSON:API error objects into one message
fn describe_errors(errors: &[RawApiError]) -> String {
    let described: Vec<String> = errors
        .iter()
        .map(|e| {
            let code = e.code.as_deref().or(e.status.as_deref()).unwrap_or("error");
            match e.detail.as_deref().or(e.title.as_deref()) {
                Some(detail) => format!("{code}: {detail}"),
                None => code.to_string(),
            }
        })
        .collect();

    if described.is_empty() {
        "unspecified error".to_string()
    } else {
        described.join("; ")
    }
}

// --- Raw JSON:API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawDocument<D> {
    data: Option<D>,
    errors: Option<Vec<RawApiError>>,
}

#[derive(Debug, Deserialize)]
struct RawApiError {
    status: Option<String>,
    code: Option<String>,
    title: Option<String>,
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    data: Option<RawResourceRef>,
}

impl RawRelationship {
    fn into_id(self) -> Option<String> {
        self.data.map(|r| r.id)
    }
}

#[derive(Debug, Deserialize)]
struct RawResourceRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RawStop {
    id: String,
    attributes: Option<RawStopAttributes>,
    relationships: Option<RawStopRelationships>,
}

impl RawStop {
    const fn bare(id: String) -> Self {
        Self {
            id,
            attributes: None,
            relationships: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawStopAttributes {
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawStopRelationships {
    parent_station: Option<RawRelationship>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    id: String,
    attributes: Option<RawPredictionAttributes>,
    relationships: Option<RawPredictionRelationships>,
}

impl RawPrediction {
    const fn bare(id: String) -> Self {
        Self {
            id,
            attributes: None,
            relationships: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawPredictionAttributes {
    departure_time: Option<String>,
    direction_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPredictionRelationships {
    route: Option<RawRelationship>,
    trip: Option<RawRelationship>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    id: String,
    attributes: Option<RawRouteAttributes>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRouteAttributes {
    direction_names: Option<Vec<Option<String>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_stops(body: &str) -> Result<Vec<Stop>, MbtaError> {
        MbtaV3Client::parse_document(StatusCode::OK, body).map(|values| {
            MbtaV3Client::collect_resources(values, RawStop::bare)
                .into_iter()
                .map(MbtaV3Client::convert_stop)
                .collect()
        })
    }

    fn parse_predictions(body: &str) -> Result<Vec<Prediction>, MbtaError> {
        MbtaV3Client::parse_document(StatusCode::OK, body).map(|values| {
            MbtaV3Client::collect_resources(values, RawPrediction::bare)
                .into_iter()
                .map(MbtaV3Client::convert_prediction)
                .collect()
        })
    }

    #[test]
    fn test_parse_stops() {
        let json = r#"{
            "data": [
                {
                    "id": "70080",
                    "type": "stop",
                    "attributes": {
                        "name": "South Station",
                        "latitude": 42.352271,
                        "longitude": -71.055242
                    },
                    "relationships": {
                        "parent_station": { "data": { "id": "place-sstat", "type": "stop" } }
                    }
                },
                {
                    "id": "6564",
                    "type": "stop",
                    "attributes": { "name": "Summer St @ Atlantic Ave", "latitude": 42.3527, "longitude": -71.0556 },
                    "relationships": { "parent_station": { "data": null } }
                }
            ]
        }"#;

        let stops = parse_stops(json).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].name, "South Station");
        assert_eq!(stops[0].parent_station_id.as_deref(), Some("place-sstat"));
        assert!((stops[0].latitude.unwrap() - 42.352_271).abs() < 1e-9);
        assert!(stops[1].parent_station_id.is_none());
    }

    #[test]
    fn test_parse_stop_missing_attributes() {
        let json = r#"{ "data": [ { "id": "bare", "type": "stop" } ] }"#;
        let stops = parse_stops(json).unwrap();
        assert_eq!(stops[0].id, "bare");
        assert!(stops[0].name.is_empty());
        assert!(stops[0].latitude.is_none());
    }

    #[test]
    fn test_malformed_stop_keeps_batch() {
        let json = r#"{
            "data": [
                {
                    "id": "70080",
                    "attributes": { "name": "South Station", "latitude": 42.352271, "longitude": -71.055242 }
                },
                {
                    "id": "bad",
                    "attributes": { "name": "Broken", "latitude": "n/a", "longitude": -71.0 }
                },
                { "attributes": { "name": 7 } }
            ]
        }"#;

        let stops = parse_stops(json).unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].name, "South Station");
        assert_eq!(stops[1].id, "bad");
        assert!(stops[1].latitude.is_none());
        assert!(stops[1].longitude.is_none());
    }

    #[test]
    fn test_malformed_prediction_keeps_batch() {
        let json = r#"{
            "data": [
                { "id": "bad", "attributes": { "departure_time": 12345, "direction_id": 0 } },
                {
                    "id": "good",
                    "attributes": { "departure_time": "2024-01-01T09:30:00-05:00", "direction_id": 0 },
                    "relationships": { "route": { "data": { "id": "Red", "type": "route" } } }
                }
            ]
        }"#;

        let predictions = parse_predictions(json).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].id, "bad");
        assert!(predictions[0].departure_time.is_none());
        assert!(predictions[0].route_id.is_none());
        assert_eq!(predictions[1].route_id.as_deref(), Some("Red"));
    }

    #[test]
    fn test_parse_predictions() {
        let json = r#"{
            "data": [{
                "id": "prediction-1",
                "type": "prediction",
                "attributes": {
                    "arrival_time": null,
                    "departure_time": "2024-01-01T09:30:00-05:00",
                    "direction_id": 1
                },
                "relationships": {
                    "route": { "data": { "id": "Red", "type": "route" } },
                    "trip": { "data": { "id": "60392455", "type": "trip" } },
                    "stop": { "data": { "id": "70080", "type": "stop" } }
                }
            }]
        }"#;

        let prediction = parse_predictions(json).unwrap().remove(0);

        assert_eq!(prediction.route_id.as_deref(), Some("Red"));
        assert_eq!(prediction.direction_id, Some(1));
        assert_eq!(prediction.trip_id.as_deref(), Some("60392455"));
        assert_eq!(
            prediction.departure_time.as_deref(),
            Some("2024-01-01T09:30:00-05:00")
        );
    }

    #[test]
    fn test_negative_direction_id_is_dropped() {
        let json = r#"{ "data": [ { "id": "p", "attributes": { "direction_id": -1 } } ] }"#;
        let prediction = parse_predictions(json).unwrap().remove(0);
        assert!(prediction.direction_id.is_none());
        assert!(prediction.route_id.is_none());
    }

    #[test]
    fn test_parse_route() {
        let json = r#"{
            "data": {
                "id": "Red",
                "type": "route",
                "attributes": {
                    "long_name": "Red Line",
                    "direction_names": ["South", "North"]
                }
            }
        }"#;

        let raw: RawRoute = MbtaV3Client::parse_document(StatusCode::OK, json).unwrap();
        let route = MbtaV3Client::convert_route(raw);
        assert_eq!(route.id, "Red");
        assert_eq!(route.direction_names, ["South", "North"]);
    }

    #[test]
    fn test_errors_member_is_api_error() {
        let json = r#"{ "errors": [ { "status": "400", "code": "bad_request", "detail": "Invalid filter" } ] }"#;
        let err = parse_stops(json).unwrap_err();
        assert!(matches!(err, MbtaError::Api(ref msg) if msg == "bad_request: Invalid filter"));
    }

    #[test]
    fn test_not_found_status() {
        let json = r#"{ "errors": [ { "status": "404", "code": "not_found" } ] }"#;
        let err =
            MbtaV3Client::parse_document::<RawRoute>(StatusCode::NOT_FOUND, json).unwrap_err();
        assert!(matches!(err, MbtaError::NotFound(ref msg) if msg == "not_found"));
    }

    #[test]
    fn test_server_error_without_body() {
        let err = MbtaV3Client::parse_document::<Vec<serde_json::Value>>(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>",
        )
        .unwrap_err();
        assert!(matches!(err, MbtaError::RequestFailed(ref msg) if msg.contains("500")));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_stops("not json"),
            Err(MbtaError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_data_member() {
        assert!(matches!(parse_stops("{}"), Err(MbtaError::ParseError(_))));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MbtaConfig {
            timeout_secs: 0,
            ..MbtaConfig::for_testing()
        };
        assert!(matches!(
            MbtaV3Client::new(&config),
            Err(MbtaError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_cache_follows_config() {
        let uncached = MbtaV3Client::new(&MbtaConfig::for_testing()).unwrap();
        assert!(uncached.routes.is_none());

        let cached = MbtaV3Client::new(&MbtaConfig::default()).unwrap();
        assert!(cached.routes.is_some());
    }
}
