//! Human-readable summaries of a planning result.

use crate::solver::{FoundRoute, Objective, OptimalRouteResult};

const METERS_PER_MILE: f64 = 1609.34;

pub const NO_ROUTE_MESSAGE: &str = "No valid path found within the time constraints.";

/// Miles with two decimals, e.g. `"1.86 miles"`.
pub fn format_miles(meters: u64) -> String {
    format!("{:.2} miles", meters as f64 / METERS_PER_MILE)
}

/// `H:MM:SS`, hours unpadded and unbounded.
pub fn format_duration(secs: u64) -> String {
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

pub fn format_metric(objective: Objective, total: u64) -> String {
    match objective {
        Objective::Distance => format_miles(total),
        Objective::Time => format_duration(total),
    }
}

/// Two lines: the path, then the travel total and arrival time.
pub fn describe_route(route: &FoundRoute) -> String {
    let path = route.stops.join(" to ");
    format!(
        "Your path goes from {path}\nIt takes {} to travel and ends at {}",
        format_metric(route.objective, route.total_metric),
        route.arrival
    )
}

pub fn describe(result: &OptimalRouteResult) -> String {
    match result {
        OptimalRouteResult::Found(route) => describe_route(route),
        OptimalRouteResult::NoFeasibleRoute => NO_ROUTE_MESSAGE.to_string(),
    }
}
