//! Waypoints and itineraries.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::clock::{ClockTime, SECONDS_PER_DAY};
use crate::error::ItineraryError;

/// Geographic coordinate, opaque to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One location in the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Display name, unique within an itinerary.
    pub name: String,
    pub position: Position,
    /// Time spent at the stop once arrived, in seconds.
    #[serde(default)]
    pub dwell_secs: u64,
    /// Closing time; the visit (including dwell) must be over by then.
    #[serde(default)]
    pub deadline: Option<ClockTime>,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            dwell_secs: 0,
            deadline: None,
        }
    }

    pub fn with_dwell(mut self, dwell_secs: u64) -> Self {
        self.dwell_secs = dwell_secs;
        self
    }

    pub fn with_deadline(mut self, deadline: ClockTime) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Where the route finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteEnd {
    /// A distinct waypoint stored last in the itinerary.
    Fixed,
    /// Back at the start.
    ReturnToStart,
}

/// Ordered waypoints: index 0 is the start, the intermediate stops follow,
/// and for [`RouteEnd::Fixed`] the end is the last index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    waypoints: Vec<Waypoint>,
    end: RouteEnd,
}

impl Itinerary {
    /// Start, intermediate stops, and a distinct end waypoint.
    pub fn new(
        start: Waypoint,
        stops: Vec<Waypoint>,
        end: Waypoint,
    ) -> Result<Self, ItineraryError> {
        let mut waypoints = Vec::with_capacity(stops.len() + 2);
        waypoints.push(start);
        waypoints.extend(stops);
        waypoints.push(end);
        Self::validated(waypoints, RouteEnd::Fixed)
    }

    /// Start and intermediate stops; the route returns to the start.
    pub fn round_trip(start: Waypoint, stops: Vec<Waypoint>) -> Result<Self, ItineraryError> {
        let mut waypoints = Vec::with_capacity(stops.len() + 1);
        waypoints.push(start);
        waypoints.extend(stops);
        Self::validated(waypoints, RouteEnd::ReturnToStart)
    }

    fn validated(waypoints: Vec<Waypoint>, end: RouteEnd) -> Result<Self, ItineraryError> {
        let mut seen = HashSet::new();
        for waypoint in &waypoints {
            if !seen.insert(waypoint.name.as_str()) {
                return Err(ItineraryError::DuplicateName(waypoint.name.clone()));
            }
            if waypoint
                .deadline
                .is_some_and(|deadline| deadline.as_seconds() >= SECONDS_PER_DAY)
            {
                return Err(ItineraryError::DeadlineOutOfRange(waypoint.name.clone()));
            }
        }

        let itinerary = Self { waypoints, end };
        for endpoint in [0, itinerary.end_index()] {
            let waypoint = &itinerary.waypoints[endpoint];
            if waypoint.dwell_secs != 0 {
                return Err(ItineraryError::DwellOnEndpoint(waypoint.name.clone()));
            }
        }
        Ok(itinerary)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoint(&self, index: usize) -> &Waypoint {
        &self.waypoints[index]
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn end(&self) -> RouteEnd {
        self.end
    }

    pub fn is_round_trip(&self) -> bool {
        self.end == RouteEnd::ReturnToStart
    }

    pub fn end_index(&self) -> usize {
        match self.end {
            RouteEnd::Fixed => self.waypoints.len() - 1,
            RouteEnd::ReturnToStart => 0,
        }
    }

    /// Indices whose visiting order is searched.
    pub fn intermediate_indices(&self) -> Range<usize> {
        match self.end {
            RouteEnd::Fixed => 1..self.waypoints.len() - 1,
            RouteEnd::ReturnToStart => 1..self.waypoints.len(),
        }
    }

    /// Positions in index order, as handed to a metrics provider.
    pub fn positions(&self) -> Vec<Position> {
        self.waypoints.iter().map(|w| w.position).collect()
    }
}
