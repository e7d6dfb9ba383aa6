//! waypoint-planner
//!
//! Exact ordering of a small set of waypoints between a fixed start and a
//! fixed (or round-trip) end, minimizing distance or travel time without
//! arriving anywhere after it closes.

pub mod clock;
pub mod error;
pub mod haversine;
pub mod matrix;
pub mod model;
pub mod osrm;
pub mod planner;
pub mod report;
pub mod routes_api;
pub mod solver;
pub mod traits;

pub use clock::ClockTime;
pub use error::{ItineraryError, MetricsError, PlanError};
pub use matrix::{Leg, TravelMatrix};
pub use model::{Itinerary, Position, RouteEnd, Waypoint};
pub use planner::plan_route;
pub use solver::{
    find_optimal_route, DeadlineMode, FoundRoute, Objective, OptimalRouteResult, SolveOptions,
};
pub use traits::{TravelMetricsProvider, TravelMode};
