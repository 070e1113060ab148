//! Nearest-stop resolution
//!
//! Picks the candidate closest to the query location by geodesic distance
//! and identifies it by its parent station when it belongs to one.

use domain::{DomainError, GeoLocation, ResolvedStop, Screened, SkipReason, Skipped, StopCandidate};
use tracing::debug;

/// Resolve the stop nearest to `location`
///
/// Candidates without coordinates, or whose distance cannot be computed,
/// are skipped without affecting the others. When several candidates share
/// the minimum distance the first one encountered wins.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no candidate is usable.
pub fn resolve_nearest_stop(
    location: &GeoLocation,
    candidates: &[StopCandidate],
) -> Result<Screened<ResolvedStop>, DomainError> {
    let mut nearest: Option<(f64, &StopCandidate, GeoLocation)> = None;
    let mut skipped = Vec::new();

    for candidate in candidates {
        let Some(stop_location) = candidate.location() else {
            debug!(stop_id = %candidate.id, "Skipping stop without coordinates");
            skipped.push(Skipped::new(&candidate.id, SkipReason::MissingCoordinates));
            continue;
        };

        let distance = if location.is_finite() && stop_location.is_finite() {
            location.distance_miles(&stop_location)
        } else {
            f64::NAN
        };
        if !distance.is_finite() {
            debug!(stop_id = %candidate.id, "Skipping stop with non-finite distance");
            skipped.push(Skipped::new(&candidate.id, SkipReason::NonFiniteDistance));
            continue;
        }

        if nearest.as_ref().is_none_or(|(best, ..)| distance < *best) {
            nearest = Some((distance, candidate, stop_location));
        }
    }

    let (distance, candidate, stop_location) =
        nearest.ok_or_else(|| DomainError::not_found("Stop", location.to_string()))?;

    let resolved = ResolvedStop::from_candidate(candidate, stop_location, distance);
    debug!(
        stop_id = %resolved.id,
        distance_miles = resolved.distance_miles,
        skipped = skipped.len(),
        "Resolved nearest stop"
    );

    Ok(Screened::new(resolved, skipped))
}
