//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod transit_data_port;

#[cfg(test)]
pub use transit_data_port::MockTransitDataPort;
pub use transit_data_port::TransitDataPort;
