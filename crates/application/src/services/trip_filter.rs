//! Direction-based trip filtering

use domain::{AllowedDirections, RouteDirections, Screened, SkipReason, Skipped, TripRecord};
use tracing::debug;

/// Keep only trips travelling in an allowed direction
///
/// Each trip's direction is `lookup(route_id)[direction_index]`. Trips
/// whose route, direction index, or direction lookup is unusable are
/// skipped with a reason; the rest of the batch is unaffected. Trips in a
/// direction outside `allowed` are dropped silently. Input order is kept.
pub fn filter_trips<'a, F>(
    trips: Vec<TripRecord>,
    allowed: &AllowedDirections,
    mut lookup: F,
) -> Screened<Vec<TripRecord>>
where
    F: FnMut(&str) -> Result<&'a RouteDirections, String>,
{
    let mut kept = Vec::with_capacity(trips.len());
    let mut skipped = Vec::new();

    for trip in trips {
        let Some(route_id) = trip.route_id.as_deref() else {
            skipped.push(Skipped::new(&trip.id, SkipReason::MissingRoute));
            continue;
        };
        let Some(index) = trip.direction_index else {
            skipped.push(Skipped::new(&trip.id, SkipReason::MissingDirectionIndex));
            continue;
        };
        let directions = match lookup(route_id) {
            Ok(directions) => directions,
            Err(message) => {
                skipped.push(Skipped::new(
                    &trip.id,
                    SkipReason::DirectionLookupFailed { message },
                ));
                continue;
            },
        };
        let Some(direction) = directions.get(index) else {
            skipped.push(Skipped::new(
                &trip.id,
                SkipReason::DirectionIndexOutOfRange {
                    index,
                    available: directions.len(),
                },
            ));
            continue;
        };

        if allowed.contains(direction) {
            kept.push(trip);
        } else {
            debug!(trip = %trip.id, %direction, "Direction not allowed");
        }
    }

    for skip in &skipped {
        debug!(%skip, "Skipped trip");
    }

    Screened::new(kept, skipped)
}
