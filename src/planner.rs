//! End-to-end planning: fetch metrics, then search.

use tracing::{info, warn};

use crate::clock::ClockTime;
use crate::error::PlanError;
use crate::model::Itinerary;
use crate::solver::{find_optimal_route, OptimalRouteResult, SolveOptions};
use crate::traits::{TravelMetricsProvider, TravelMode};

/// Resolves the itinerary's travel metrics through `provider` and returns the
/// best order.
///
/// A provider failure surfaces as [`PlanError::MetricsUnavailable`] and the
/// search never starts.
pub fn plan_route<P>(
    itinerary: &Itinerary,
    provider: &P,
    mode: TravelMode,
    start_time: ClockTime,
    options: &SolveOptions,
) -> Result<OptimalRouteResult, PlanError>
where
    P: TravelMetricsProvider + ?Sized,
{
    let positions = itinerary.positions();
    let matrix = provider.metrics_for(&positions, mode).map_err(|err| {
        warn!(event = "metrics_unavailable", mode = %mode, error = %err);
        PlanError::MetricsUnavailable(err)
    })?;
    info!(event = "metrics_resolved", waypoints = matrix.size(), mode = %mode);

    find_optimal_route(itinerary, &matrix, start_time, options)
}
