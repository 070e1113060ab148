//! Domain entities
//!
//! Request-scoped records produced by the external collaborators and the
//! outcome types of the selection pipeline.

mod screened;
mod selection;
mod stop;
mod trip;

pub use screened::{Screened, SkipReason, Skipped};
pub use selection::{NO_TRIPS_MESSAGE, SelectionResult, format_signed_duration};
pub use stop::{ResolvedStop, StopCandidate};
pub use trip::{RouteDirections, TripRecord};
