//! Haversine travel-metrics provider (fallback when no routing service is
//! reachable).
//!
//! Uses great-circle distance and an assumed speed per travel mode.
//! Ignores the road network, so it underestimates real distances.

use crate::error::MetricsError;
use crate::matrix::{Leg, TravelMatrix};
use crate::model::Position;
use crate::traits::{TravelMetricsProvider, TravelMode};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Straight-line provider with assumed average speeds in km/h.
#[derive(Debug, Clone)]
pub struct HaversineMatrix {
    pub drive_kmh: f64,
    pub bicycle_kmh: f64,
    pub transit_kmh: f64,
    pub walk_kmh: f64,
}

impl Default for HaversineMatrix {
    fn default() -> Self {
        Self {
            drive_kmh: 40.0,
            bicycle_kmh: 15.0,
            transit_kmh: 25.0,
            walk_kmh: 5.0,
        }
    }
}

impl HaversineMatrix {
    /// Same speed for every mode.
    pub fn uniform(speed_kmh: f64) -> Self {
        Self {
            drive_kmh: speed_kmh,
            bicycle_kmh: speed_kmh,
            transit_kmh: speed_kmh,
            walk_kmh: speed_kmh,
        }
    }

    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Drive => self.drive_kmh,
            TravelMode::Bicycle => self.bicycle_kmh,
            TravelMode::Transit => self.transit_kmh,
            TravelMode::Walk => self.walk_kmh,
        }
    }

    /// Calculate haversine distance between two points in kilometers.
    fn haversine_km(from: Position, to: Position) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    fn km_to_seconds(km: f64, speed_kmh: f64) -> u64 {
        let hours = km / speed_kmh;
        (hours * 3600.0).round() as u64
    }
}

impl TravelMetricsProvider for HaversineMatrix {
    fn metrics_for(
        &self,
        positions: &[Position],
        mode: TravelMode,
    ) -> Result<TravelMatrix, MetricsError> {
        let speed = self.speed_kmh(mode);
        if !(speed > 0.0) {
            return Err(MetricsError::UnsupportedMode(mode));
        }

        Ok(TravelMatrix::from_fn(positions.len(), |i, j| {
            if i == j {
                return Leg::default();
            }
            let km = Self::haversine_km(positions[i], positions[j]);
            Leg::new((km * 1000.0).round() as u64, Self::km_to_seconds(km, speed))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn las_vegas() -> Position {
        Position::new(36.17, -115.14)
    }

    fn los_angeles() -> Position {
        Position::new(34.05, -118.24)
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = HaversineMatrix::haversine_km(las_vegas(), las_vegas());
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Actual distance ~370 km
        let dist = HaversineMatrix::haversine_km(las_vegas(), los_angeles());
        assert!(dist > 350.0 && dist < 400.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_matrix_diagonal_is_zero() {
        let provider = HaversineMatrix::default();
        let positions = vec![
            Position::new(36.1, -115.1),
            Position::new(36.2, -115.2),
            Position::new(36.3, -115.3),
        ];
        let matrix = provider.metrics_for(&positions, TravelMode::Drive).unwrap();

        for i in 0..positions.len() {
            assert_eq!(matrix.get(i, i), Leg::default(), "Diagonal should be zero");
        }
    }

    #[test]
    fn test_matrix_symmetric() {
        let provider = HaversineMatrix::default();
        let positions = vec![Position::new(36.1, -115.1), Position::new(36.2, -115.2)];
        let matrix = provider.metrics_for(&positions, TravelMode::Walk).unwrap();

        assert_eq!(matrix.get(0, 1), matrix.get(1, 0), "Matrix should be symmetric");
    }

    #[test]
    fn test_walking_slower_than_driving() {
        let provider = HaversineMatrix::default();
        let positions = vec![las_vegas(), los_angeles()];
        let drive = provider.metrics_for(&positions, TravelMode::Drive).unwrap();
        let walk = provider.metrics_for(&positions, TravelMode::Walk).unwrap();

        assert_eq!(drive.get(0, 1).distance_meters, walk.get(0, 1).distance_meters);
        assert!(walk.get(0, 1).duration_secs > drive.get(0, 1).duration_secs);
    }

    #[test]
    fn test_reasonable_travel_time() {
        // 10 km at 40 km/h = 0.25 hours = 900 seconds
        assert_eq!(HaversineMatrix::km_to_seconds(10.0, 40.0), 900);
    }

    #[test]
    fn test_zero_speed_is_unsupported() {
        let provider = HaversineMatrix {
            transit_kmh: 0.0,
            ..HaversineMatrix::default()
        };
        let err = provider
            .metrics_for(&[las_vegas()], TravelMode::Transit)
            .unwrap_err();
        assert!(matches!(err, MetricsError::UnsupportedMode(TravelMode::Transit)));
    }
}
