//! Seams to the outside world.
//!
//! The engine never talks to a routing service itself; it receives a fully
//! resolved [`TravelMatrix`] from something implementing
//! [`TravelMetricsProvider`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;
use crate::matrix::TravelMatrix;
use crate::model::Position;

/// How the traveler moves between waypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Drive,
    Bicycle,
    Transit,
    Walk,
}

impl TravelMode {
    /// Wire name used by routing services ("DRIVE", "WALK", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "DRIVE",
            TravelMode::Bicycle => "BICYCLE",
            TravelMode::Transit => "TRANSIT",
            TravelMode::Walk => "WALK",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provides pairwise distance/duration for a set of positions.
///
/// The returned matrix is indexed by the provided position order and must be
/// square with one row per position, self-pairs included.
pub trait TravelMetricsProvider {
    fn metrics_for(
        &self,
        positions: &[Position],
        mode: TravelMode,
    ) -> Result<TravelMatrix, MetricsError>;
}

impl<P: TravelMetricsProvider + ?Sized> TravelMetricsProvider for &P {
    fn metrics_for(
        &self,
        positions: &[Position],
        mode: TravelMode,
    ) -> Result<TravelMatrix, MetricsError> {
        (**self).metrics_for(positions, mode)
    }
}
