//! Domain layer for NextRide
//!
//! Contains the records exchanged by the selection pipeline (stops, trips,
//! route directions, results), the value objects they are built from, and
//! domain errors. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
