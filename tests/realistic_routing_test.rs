//! Realistic routing tests using real Las Vegas locations.
//!
//! Metrics come from the haversine provider so these run without a routing
//! service.

mod fixtures;

use waypoint_planner::haversine::HaversineMatrix;
use waypoint_planner::report::{describe, NO_ROUTE_MESSAGE};
use waypoint_planner::{
    plan_route, ClockTime, Itinerary, Objective, OptimalRouteResult, SolveOptions, TravelMode,
};

use fixtures::las_vegas_locations::{self, Location};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn find(locations: &[Location], name: &str) -> Location {
    locations
        .iter()
        .find(|l| l.name == name)
        .cloned()
        .unwrap_or_else(|| panic!("unknown fixture location {name}"))
}

fn at(h: u64, m: u64) -> ClockTime {
    ClockTime::from_hms(h, m, 0).unwrap()
}

fn minutes(m: u64) -> u64 {
    m * 60
}

fn options(objective: Objective) -> SolveOptions {
    SolveOptions {
        objective,
        ..SolveOptions::default()
    }
}

// ============================================================================
// Strip Tests
// ============================================================================

#[test]
fn test_strip_crawl_follows_the_strip() {
    let strip = las_vegas_locations::STRIP_STOPS;
    let start = find(las_vegas_locations::CASINOS, "Wynn Las Vegas");
    // Deliberately scrambled.
    let stops = ["Hard Rock Cafe", "Sinatra", "Gordon Ramsay BurGR", "Yard House"]
        .iter()
        .map(|name| find(strip, name).waypoint())
        .collect();
    let end = find(strip, "Strip Steak");

    let itinerary = Itinerary::new(start.waypoint(), stops, end.waypoint()).unwrap();
    let result = plan_route(
        &itinerary,
        &HaversineMatrix::default(),
        TravelMode::Walk,
        at(18, 0),
        &options(Objective::Distance),
    )
    .unwrap();

    let route = result.found().expect("no deadlines, a route must exist");
    assert_eq!(
        route.stops,
        vec![
            "Wynn Las Vegas",
            "Sinatra",
            "Yard House",
            "Gordon Ramsay BurGR",
            "Hard Rock Cafe",
            "Strip Steak",
        ]
    );
    assert!(describe(&result).starts_with("Your path goes from Wynn Las Vegas to Sinatra"));
}

#[test]
fn test_parallel_search_agrees_on_real_data() {
    let start = find(las_vegas_locations::CASINOS, "Bellagio");
    let stops = las_vegas_locations::STRIP_STOPS
        .iter()
        .chain(las_vegas_locations::HENDERSON_STOPS)
        .take(7)
        .map(Location::waypoint)
        .collect();
    let itinerary = Itinerary::round_trip(start.waypoint(), stops).unwrap();
    let provider = HaversineMatrix::default();

    let sequential = plan_route(
        &itinerary,
        &provider,
        TravelMode::Drive,
        at(9, 0),
        &options(Objective::Time),
    )
    .unwrap();
    let parallel = plan_route(
        &itinerary,
        &provider,
        TravelMode::Drive,
        at(9, 0),
        &SolveOptions {
            parallel: true,
            ..options(Objective::Time)
        },
    )
    .unwrap();

    assert_eq!(sequential, parallel);
    let route = sequential.found().unwrap();
    assert_eq!(route.stops.first(), route.stops.last());
    assert_eq!(route.stops.len(), 9);
}

// ============================================================================
// Closing Time Tests
// ============================================================================

fn henderson_errands(sushi_closes: ClockTime) -> Itinerary {
    let henderson = las_vegas_locations::HENDERSON_STOPS;
    let start = find(las_vegas_locations::CASINOS, "Longhorn Casino");
    let stops = vec![
        find(henderson, "I Love Sushi Henderson")
            .waypoint()
            .with_deadline(sushi_closes),
        find(henderson, "Islander's Grill").waypoint().with_dwell(minutes(30)),
        find(henderson, "Green Valley Ranch Area").waypoint().with_dwell(minutes(30)),
        find(henderson, "Sunset Station Area").waypoint().with_dwell(minutes(30)),
    ];
    Itinerary::round_trip(start.waypoint(), stops).unwrap()
}

#[test]
fn test_closing_stop_visited_first() {
    // About 20 minutes' drive straight to the sushi place; any detour costs
    // at least 30 minutes of dwell.
    let itinerary = henderson_errands(at(11, 30));

    let result = plan_route(
        &itinerary,
        &HaversineMatrix::default(),
        TravelMode::Drive,
        at(11, 0),
        &options(Objective::Distance),
    )
    .unwrap();

    let route = result.found().expect("sushi first is feasible");
    assert_eq!(route.stops[1], "I Love Sushi Henderson");
    assert_eq!(route.stops.last().map(String::as_str), Some("Longhorn Casino"));
    // Three 30 minute stays plus the driving.
    assert!(route.arrival > at(12, 30));
}

#[test]
fn test_closing_too_early_reports_no_route() {
    let itinerary = henderson_errands(at(11, 5));

    let result = plan_route(
        &itinerary,
        &HaversineMatrix::default(),
        TravelMode::Drive,
        at(11, 0),
        &options(Objective::Time),
    )
    .unwrap();

    assert_eq!(result, OptimalRouteResult::NoFeasibleRoute);
    assert_eq!(describe(&result), NO_ROUTE_MESSAGE);
}
