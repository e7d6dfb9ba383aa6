//! Real Las Vegas / Henderson locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use waypoint_planner::{Position, Waypoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn position(&self) -> Position {
        Position::new(self.lat, self.lng)
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.name, self.position())
    }
}

// ============================================================================
// Major Casinos / Hotels (good for start locations)
// ============================================================================

pub const CASINOS: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("Caesars Palace", 36.1162, -115.1745),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
];

// ============================================================================
// Along the Strip, north to south
// ============================================================================

pub const STRIP_STOPS: &[Location] = &[
    Location::new("Sinatra", 36.1300035, -115.1654850),
    Location::new("Grimaldi's Pizzeria", 36.1248850, -115.1683540),
    Location::new("Yard House", 36.1177147, -115.1691992),
    Location::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("Strip Steak", 36.0908722, -115.1776176),
];

// ============================================================================
// Henderson / East Las Vegas Area
// ============================================================================

pub const HENDERSON_STOPS: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
];

pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::new();
    all.extend_from_slice(CASINOS);
    all.extend_from_slice(STRIP_STOPS);
    all.extend_from_slice(HENDERSON_STOPS);
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_vegas_area() {
        for loc in all_locations() {
            assert!(loc.lat > 35.9 && loc.lat < 36.3, "{} lat out of range: {}", loc.name, loc.lat);
            assert!(loc.lng > -115.4 && loc.lng < -114.8, "{} lng out of range: {}", loc.name, loc.lng);
        }
    }

    #[test]
    fn test_names_unique() {
        let all = all_locations();
        let mut names: Vec<_> = all.iter().map(|l| l.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all.len());
    }
}
