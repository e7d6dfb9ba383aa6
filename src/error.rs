//! Error types for metric retrieval and route planning.
//!
//! Finding no feasible order is not an error; see
//! [`OptimalRouteResult::NoFeasibleRoute`](crate::solver::OptimalRouteResult).

use thiserror::Error;

use crate::traits::TravelMode;

/// Failures of a [`TravelMetricsProvider`](crate::traits::TravelMetricsProvider).
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("routing service request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("routing service returned {code}: {message}")]
    Service { code: String, message: String },
    #[error("travel mode {0} is not supported by this provider")]
    UnsupportedMode(TravelMode),
    #[error("no travel metrics for {origin} -> {destination}")]
    MissingEntry { origin: usize, destination: usize },
    #[error("no route found from {origin} to {destination}")]
    RouteNotFound { origin: usize, destination: usize },
    #[error("expected a {expected}x{expected} matrix, got {actual} entries")]
    Shape { expected: usize, actual: usize },
}

/// Problems with the waypoints handed to [`Itinerary`](crate::model::Itinerary).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItineraryError {
    #[error("waypoint name {0:?} is used more than once")]
    DuplicateName(String),
    #[error("waypoint {0:?} has a dwell time but is not an intermediate stop")]
    DwellOnEndpoint(String),
    #[error("waypoint {0:?} has a deadline at or after 24:00")]
    DeadlineOutOfRange(String),
}

/// Errors from [`plan_route`](crate::planner::plan_route) and
/// [`find_optimal_route`](crate::solver::find_optimal_route).
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("travel metrics unavailable: {0}")]
    MetricsUnavailable(#[from] MetricsError),
    #[error("invalid itinerary: {0}")]
    InvalidInput(#[from] ItineraryError),
    #[error("matrix covers {actual} waypoints but the itinerary has {expected}")]
    MatrixSize { expected: usize, actual: usize },
    #[error("{count} intermediate stops exceed the limit of {max}")]
    TooManyStops { count: usize, max: usize },
}
