//! OSRM HTTP adapter for travel-metrics matrices.

use serde::Deserialize;
use tracing::debug;

use crate::error::MetricsError;
use crate::matrix::{Leg, TravelMatrix};
use crate::model::Position;
use crate::traits::{TravelMetricsProvider, TravelMode};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// `/table` request URL; OSRM wants `lng,lat` pairs.
    fn table_url(&self, positions: &[Position], profile: &str) -> String {
        let coords = positions
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=duration,distance",
            self.config.base_url, profile, coords
        )
    }
}

/// OSRM profile serving a travel mode. Transit has none.
fn profile_for(mode: TravelMode) -> Option<&'static str> {
    match mode {
        TravelMode::Drive => Some("car"),
        TravelMode::Bicycle => Some("bike"),
        TravelMode::Walk => Some("foot"),
        TravelMode::Transit => None,
    }
}

impl TravelMetricsProvider for OsrmClient {
    fn metrics_for(
        &self,
        positions: &[Position],
        mode: TravelMode,
    ) -> Result<TravelMatrix, MetricsError> {
        if positions.is_empty() {
            return Ok(TravelMatrix::from_fn(0, |_, _| Leg::default()));
        }
        let profile = profile_for(mode).ok_or(MetricsError::UnsupportedMode(mode))?;

        let url = self.table_url(positions, profile);
        debug!(event = "osrm_table_request", locations = positions.len(), profile);

        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmTableResponse>()?;

        body.into_matrix(positions.len())
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    durations: Option<Vec<Vec<Option<f64>>>>,
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn into_matrix(self, size: usize) -> Result<TravelMatrix, MetricsError> {
        if self.code != "Ok" {
            return Err(MetricsError::Service {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let missing = || MetricsError::Service {
            code: "Ok".to_string(),
            message: "response lacks duration or distance annotations".to_string(),
        };
        let durations = self.durations.ok_or_else(missing)?;
        let distances = self.distances.ok_or_else(missing)?;

        for table in [&durations, &distances] {
            if table.len() != size {
                return Err(MetricsError::Shape {
                    expected: size,
                    actual: table.len(),
                });
            }
            if let Some(row) = table.iter().find(|row| row.len() != size) {
                return Err(MetricsError::Shape {
                    expected: size,
                    actual: row.len(),
                });
            }
        }

        // Null cells mean OSRM found no route between the pair.
        let mut entries = Vec::with_capacity(size * size);
        for origin in 0..size {
            for destination in 0..size {
                match (durations[origin][destination], distances[origin][destination]) {
                    (Some(duration), Some(distance)) => entries.push((
                        origin,
                        destination,
                        Leg::new(distance.round() as u64, duration.round() as u64),
                    )),
                    _ if origin == destination => {}
                    _ => return Err(MetricsError::RouteNotFound { origin, destination }),
                }
            }
        }

        TravelMatrix::from_entries(size, entries)
    }
}
