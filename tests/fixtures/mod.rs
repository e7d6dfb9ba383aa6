//! Test fixtures for waypoint-planner.
//!
//! Real Las Vegas / Henderson locations (from OpenStreetMap), usable as
//! itinerary waypoints.

pub mod las_vegas_locations;

pub use las_vegas_locations::*;
