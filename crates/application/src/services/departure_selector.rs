//! Earliest-departure selection

use chrono::{NaiveDateTime, TimeDelta};
use domain::{DepartureTime, Screened, SkipReason, Skipped, TripRecord};
use tracing::debug;

/// The trip leaving soonest, together with its parsed departure time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoonestDeparture {
    /// The selected trip
    pub trip: TripRecord,
    /// Its departure time, offset discarded
    pub departure: DepartureTime,
}

impl SoonestDeparture {
    /// Signed time from `now` until departure
    ///
    /// Negative when the published departure is already in the past, which
    /// happens with stale predictions at busy stations.
    #[must_use]
    pub fn time_until_arrival(&self, now: NaiveDateTime) -> TimeDelta {
        self.departure.until(now)
    }

    /// External trip reference of the selected trip
    #[must_use]
    pub fn trip_id(&self) -> Option<&str> {
        self.trip.trip_id()
    }
}

/// Select the trip with the earliest departure
///
/// Trips without a parseable departure time are skipped. Ties go to the
/// first trip encountered. Returns `None` when no trip qualifies.
pub fn select_soonest(trips: Vec<TripRecord>) -> Screened<Option<SoonestDeparture>> {
    let mut soonest: Option<SoonestDeparture> = None;
    let mut skipped = Vec::new();

    for trip in trips {
        let departure = match trip.departure() {
            Some(Ok(departure)) => departure,
            Some(Err(e)) => {
                skipped.push(Skipped::new(
                    &trip.id,
                    SkipReason::InvalidDepartureTime {
                        message: e.to_string(),
                    },
                ));
                continue;
            },
            None => {
                skipped.push(Skipped::new(&trip.id, SkipReason::MissingDepartureTime));
                continue;
            },
        };

        if soonest.as_ref().is_none_or(|best| departure < best.departure) {
            soonest = Some(SoonestDeparture { trip, departure });
        }
    }

    if let Some(best) = &soonest {
        debug!(trip = %best.trip.id, departure = %best.departure, "Selected soonest departure");
    }

    Screened::new(soonest, skipped)
}
