//! Value Objects - Immutable, identity-less domain primitives

mod allowed_directions;
mod departure_time;
mod geo_location;

pub use allowed_directions::{AllowedDirections, DEFAULT_ALLOWED_DIRECTIONS};
pub use departure_time::DepartureTime;
pub use geo_location::GeoLocation;
