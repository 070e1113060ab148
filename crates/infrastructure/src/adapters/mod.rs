//! Adapters implementing application ports

mod mbta_adapter;

pub use mbta_adapter::MbtaTransitAdapter;
