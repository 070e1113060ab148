//! Application layer - Use cases and orchestration
//!
//! Contains the selection pipeline stages, the leave-now orchestrator, and
//! the port through which transit data is fetched. Adapters in the
//! infrastructure layer implement the port.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
