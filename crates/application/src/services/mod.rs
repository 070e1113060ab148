//! Application services - Use case implementations

mod departure_selector;
mod leave_now_service;
mod stop_resolver;
mod trip_filter;

pub use departure_selector::{SoonestDeparture, select_soonest};
pub use leave_now_service::{DEFAULT_SEARCH_RADIUS, LeaveNowReport, LeaveNowService};
pub use stop_resolver::resolve_nearest_stop;
pub use trip_filter::filter_trips;
