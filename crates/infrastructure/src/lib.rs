//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the MBTA transit adapter and configuration loading.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::AppConfig;
