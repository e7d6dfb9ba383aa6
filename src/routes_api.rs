//! Adapter for the hosted `computeRouteMatrix` routes service.
//!
//! Origins and destinations are the same position list, so one request
//! returns every ordered pair. Responses are a JSON array of elements, one per
//! pair, in no particular order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::MetricsError;
use crate::matrix::{Leg, TravelMatrix};
use crate::model::Position;
use crate::traits::{TravelMetricsProvider, TravelMode};

const FIELD_MASK: &str = "originIndex,destinationIndex,duration,distanceMeters,status,condition";

#[derive(Debug, Clone)]
pub struct RoutesApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    /// Sent for [`TravelMode::Drive`] only; the service rejects it otherwise.
    pub routing_preference: Option<String>,
}

impl RoutesApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://routes.googleapis.com/distanceMatrix/v2:computeRouteMatrix"
                .to_string(),
            api_key: api_key.into(),
            timeout_secs: 30,
            routing_preference: Some("TRAFFIC_AWARE".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoutesApiClient {
    config: RoutesApiConfig,
    client: reqwest::blocking::Client,
}

impl RoutesApiClient {
    pub fn new(config: RoutesApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn request_body(&self, positions: &[Position], mode: TravelMode) -> MatrixRequest {
        let waypoints: Vec<RouteMatrixWaypoint> = positions
            .iter()
            .map(|p| RouteMatrixWaypoint {
                waypoint: WaypointLocation {
                    location: Location {
                        lat_lng: LatLng {
                            latitude: p.lat,
                            longitude: p.lng,
                        },
                    },
                },
            })
            .collect();

        MatrixRequest {
            origins: waypoints.clone(),
            destinations: waypoints,
            travel_mode: mode.as_str(),
            routing_preference: match mode {
                TravelMode::Drive => self.config.routing_preference.clone(),
                _ => None,
            },
        }
    }
}

impl TravelMetricsProvider for RoutesApiClient {
    fn metrics_for(
        &self,
        positions: &[Position],
        mode: TravelMode,
    ) -> Result<TravelMatrix, MetricsError> {
        if positions.is_empty() {
            return Ok(TravelMatrix::from_fn(0, |_, _| Leg::default()));
        }

        debug!(event = "route_matrix_request", locations = positions.len(), mode = %mode);

        let elements = self
            .client
            .post(&self.config.base_url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&self.request_body(positions, mode))
            .send()?
            .error_for_status()?
            .json::<Vec<RouteMatrixElement>>()?;

        matrix_from_elements(positions.len(), elements)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatrixRequest {
    origins: Vec<RouteMatrixWaypoint>,
    destinations: Vec<RouteMatrixWaypoint>,
    travel_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    routing_preference: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct RouteMatrixWaypoint {
    waypoint: WaypointLocation,
}

#[derive(Debug, Clone, Serialize)]
struct WaypointLocation {
    location: Location,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Clone, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

/// Zero-valued fields are omitted on the wire, hence the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteMatrixElement {
    #[serde(default)]
    origin_index: usize,
    #[serde(default)]
    destination_index: usize,
    #[serde(default)]
    distance_meters: u64,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    status: Option<ElementStatus>,
}

#[derive(Debug, Deserialize)]
struct ElementStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Parses a protobuf JSON duration such as `"754s"` or `"12.5s"`.
fn parse_duration_secs(raw: &str) -> Option<u64> {
    let secs: f64 = raw.strip_suffix('s')?.parse().ok()?;
    (secs >= 0.0).then(|| secs.round() as u64)
}

fn matrix_from_elements(
    size: usize,
    elements: Vec<RouteMatrixElement>,
) -> Result<TravelMatrix, MetricsError> {
    let mut entries = Vec::with_capacity(elements.len());
    for element in elements {
        let (origin, destination) = (element.origin_index, element.destination_index);
        let self_pair = origin == destination;

        if let Some(status) = element.status.filter(|s| s.code != 0) {
            if self_pair {
                continue;
            }
            warn!(event = "route_matrix_element_failed", origin, destination, code = status.code);
            return Err(MetricsError::Service {
                code: status.code.to_string(),
                message: status.message,
            });
        }
        if element.condition.as_deref() == Some("ROUTE_NOT_FOUND") {
            if self_pair {
                continue;
            }
            return Err(MetricsError::RouteNotFound { origin, destination });
        }

        let raw = element.duration.as_deref().unwrap_or("0s");
        let duration_secs = parse_duration_secs(raw).ok_or_else(|| MetricsError::Service {
            code: "INVALID_RESPONSE".to_string(),
            message: format!("unparseable duration {raw:?}"),
        })?;
        entries.push((origin, destination, Leg::new(element.distance_meters, duration_secs)));
    }

    TravelMatrix::from_entries(size, entries)
}
