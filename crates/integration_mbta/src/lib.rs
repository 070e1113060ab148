//! MBTA V3 API integration for NextRide
//!
//! Provides stop search, real-time predictions and route direction lookup via
//! the [MBTA V3 API](https://api-v3.mbta.com), a JSON:API service covering
//! subway, commuter rail, bus and ferry in Greater Boston.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`MbtaClient`] defines the interface, implemented by [`MbtaV3Client`], which
//! caches route lookups for `cache_ttl_minutes`.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_mbta::{MbtaClient, MbtaConfig, MbtaV3Client};
//!
//! let client = MbtaV3Client::new(&MbtaConfig::default())?;
//!
//! let stops = client.stops_near(42.352271, -71.055242, 0.01).await?;
//! let predictions = client.predictions_for_stop("place-sstat").await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{MbtaClient, MbtaV3Client};
pub use config::MbtaConfig;
pub use error::MbtaError;
pub use models::{Prediction, Route, Stop};
