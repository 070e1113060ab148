//! Geographic location value object

use geo::{GeodesicDistance, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metres in one international mile
const METERS_PER_MILE: f64 = 1609.344;

/// A geographic location with latitude and longitude
///
/// Coordinates are carried as given. Range checking is left to the transit
/// API that ultimately receives them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees
    latitude: f64,
    /// Longitude in degrees
    longitude: f64,
}

impl GeoLocation {
    /// Create a new location
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether both coordinates are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Geodesic distance to another location in miles
    ///
    /// Measured on the WGS-84 ellipsoid (Karney's algorithm). Returns a
    /// non-finite value for coordinates the algorithm cannot handle.
    #[must_use]
    pub fn distance_miles(&self, other: &Self) -> f64 {
        let from = Point::new(self.longitude, self.latitude);
        let to = Point::new(other.longitude, other.latitude);
        from.geodesic_distance(&to) / METERS_PER_MILE
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Common locations used in examples and tests
impl GeoLocation {
    /// Park Street station, Boston
    #[must_use]
    pub const fn park_street() -> Self {
        Self::new(42.356_395, -71.062_424)
    }

    /// South Station, Boston
    #[must_use]
    pub const fn south_station() -> Self {
        Self::new(42.352_271, -71.055_242)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loc = GeoLocation::new(42.308_308, -71.113_116);
        assert!((loc.latitude() - 42.308_308).abs() < f64::EPSILON);
        assert!((loc.longitude() - -71.113_116).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let loc = GeoLocation::new(120.0, 400.0);
        assert!((loc.latitude() - 120.0).abs() < f64::EPSILON);
        assert!((loc.longitude() - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_finite() {
        assert!(GeoLocation::park_street().is_finite());
        assert!(!GeoLocation::new(f64::NAN, 0.0).is_finite());
        assert!(!GeoLocation::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_display() {
        let loc = GeoLocation::park_street();
        let display = format!("{loc}");
        assert!(display.contains("42.356395"));
        assert!(display.contains("-71.062424"));
    }

    #[test]
    fn test_distance_same_location() {
        let loc = GeoLocation::park_street();
        assert!(loc.distance_miles(&loc).abs() < 1e-9);
    }

    #[test]
    fn test_distance_one_degree_latitude_at_equator() {
        let a = GeoLocation::new(0.0, 0.0);
        let b = GeoLocation::new(1.0, 0.0);
        // 110 574 m on the WGS-84 ellipsoid
        assert!((a.distance_miles(&b) - 68.71).abs() < 0.05);
    }

    #[test]
    fn test_distance_park_street_south_station() {
        let d = GeoLocation::park_street().distance_miles(&GeoLocation::south_station());
        assert!(d > 0.3 && d < 0.7, "unexpected distance {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoLocation::park_street();
        let b = GeoLocation::south_station();
        assert!((a.distance_miles(&b) - b.distance_miles(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_serialization() {
        let loc = GeoLocation::new(42.35, -71.06);
        let json = serde_json::to_string(&loc).expect("serialize");
        assert!(json.contains("42.35"));
        assert!(json.contains("-71.06"));

        let deserialized: GeoLocation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loc, deserialized);
    }
}
