//! Dense travel-metrics matrix.

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

/// Distance and travel duration of one directed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Leg {
    pub distance_meters: u64,
    pub duration_secs: u64,
}

impl Leg {
    pub fn new(distance_meters: u64, duration_secs: u64) -> Self {
        Self {
            distance_meters,
            duration_secs,
        }
    }
}

/// Square `n x n` matrix of [`Leg`]s stored row-major.
///
/// `get(i, j)` is the leg from waypoint `i` to waypoint `j`, in itinerary
/// order. The matrix is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct TravelMatrix {
    legs: Vec<Leg>,
    size: usize,
}

/// Wire form of [`TravelMatrix`], checked before use.
#[derive(Deserialize)]
struct RawMatrix {
    legs: Vec<Leg>,
    size: usize,
}

impl TryFrom<RawMatrix> for TravelMatrix {
    type Error = MetricsError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        let RawMatrix { legs, size } = raw;
        let expected = size.checked_mul(size).ok_or(MetricsError::Shape {
            expected: size,
            actual: legs.len(),
        })?;
        if legs.len() != expected {
            return Err(MetricsError::Shape {
                expected: size,
                actual: legs.len(),
            });
        }
        Ok(Self { legs, size })
    }
}

impl TravelMatrix {
    /// Builds a matrix by calling `leg(from, to)` for every ordered pair.
    pub fn from_fn(size: usize, mut leg: impl FnMut(usize, usize) -> Leg) -> Self {
        let mut legs = Vec::with_capacity(size * size);
        for from in 0..size {
            for to in 0..size {
                legs.push(leg(from, to));
            }
        }
        Self { legs, size }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<Leg>>) -> Result<Self, MetricsError> {
        let size = rows.len();
        let mut legs = Vec::with_capacity(size * size);
        for row in rows {
            if row.len() != size {
                return Err(MetricsError::Shape {
                    expected: size,
                    actual: row.len(),
                });
            }
            legs.extend(row);
        }
        Ok(Self { legs, size })
    }

    /// Builds a matrix from sparse `(origin, destination, leg)` entries.
    ///
    /// Every off-diagonal pair must be present; missing self-pairs default to
    /// a zero leg.
    pub fn from_entries(
        size: usize,
        entries: impl IntoIterator<Item = (usize, usize, Leg)>,
    ) -> Result<Self, MetricsError> {
        let mut slots: Vec<Option<Leg>> = vec![None; size * size];
        for (origin, destination, leg) in entries {
            if origin >= size || destination >= size {
                return Err(MetricsError::Shape {
                    expected: size,
                    actual: origin.max(destination) + 1,
                });
            }
            slots[origin * size + destination] = Some(leg);
        }

        let mut legs = Vec::with_capacity(size * size);
        for (slot_idx, slot) in slots.into_iter().enumerate() {
            let (origin, destination) = (slot_idx / size, slot_idx % size);
            match slot {
                Some(leg) => legs.push(leg),
                None if origin == destination => legs.push(Leg::default()),
                None => return Err(MetricsError::MissingEntry { origin, destination }),
            }
        }
        Ok(Self { legs, size })
    }

    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Leg {
        self.legs[from * self.size + to]
    }

    pub fn size(&self) -> usize {
        self.size
    }
}
