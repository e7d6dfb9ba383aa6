//! Exact waypoint sequencing.
//!
//! Every ordering of the intermediate stops is enumerated in lexicographic
//! index order, simulated against the traveler's clock, and the cheapest
//! order that meets every deadline wins. Ties go to the order enumerated
//! first.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock::ClockTime;
use crate::error::PlanError;
use crate::matrix::{Leg, TravelMatrix};
use crate::model::Itinerary;

/// Quantity being minimized. Dwell time never counts toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Objective {
    /// Total meters travelled.
    Distance,
    /// Total seconds spent travelling.
    #[default]
    Time,
}

impl Objective {
    fn metric(&self, leg: Leg) -> u64 {
        match self {
            Objective::Distance => leg.distance_meters,
            Objective::Time => leg.duration_secs,
        }
    }
}

/// How a simulated clock is compared against a closing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeadlineMode {
    /// Deadlines belong to the start day; once the clock passes midnight
    /// every deadline is missed.
    #[default]
    SameDay,
    /// Only the time of day is compared, so 00:10 on the next day meets a
    /// 23:00 deadline.
    TimeOfDay,
}

impl DeadlineMode {
    fn misses(&self, clock: ClockTime, deadline: ClockTime) -> bool {
        match self {
            DeadlineMode::SameDay => clock > deadline,
            DeadlineMode::TimeOfDay => clock.time_of_day() > deadline,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub objective: Objective,
    pub deadline_mode: DeadlineMode,
    /// Split the search across rayon workers by first intermediate stop.
    pub parallel: bool,
    /// Refuse itineraries with more intermediate stops than this.
    pub max_intermediate: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            objective: Objective::Time,
            deadline_mode: DeadlineMode::SameDay,
            parallel: false,
            max_intermediate: 8, // 40_320 orders
        }
    }
}

/// Objective total and arrival time at the end of a feasible order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCost {
    pub total_metric: u64,
    pub arrival: ClockTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Accepted(RouteCost),
    /// At least one deadline was missed; `first_missed` is the earliest
    /// offending waypoint index along the order.
    Rejected { first_missed: usize },
}

/// A feasible candidate order: start, intermediates, end (as indices).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibleOrder {
    pub order: Vec<usize>,
    pub cost: RouteCost,
}

/// Feasible orders of one search, in enumeration order.
#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub feasible: Vec<FeasibleOrder>,
    pub evaluated: usize,
}

impl SearchResult {
    pub fn len(&self) -> usize {
        self.feasible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feasible.is_empty()
    }
}

/// Simulates the traveler's clock along candidate orders.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    itinerary: &'a Itinerary,
    matrix: &'a TravelMatrix,
    start_time: ClockTime,
    objective: Objective,
    deadline_mode: DeadlineMode,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        itinerary: &'a Itinerary,
        matrix: &'a TravelMatrix,
        start_time: ClockTime,
        options: &SolveOptions,
    ) -> Self {
        Self {
            itinerary,
            matrix,
            start_time,
            objective: options.objective,
            deadline_mode: options.deadline_mode,
        }
    }

    /// Evaluates a full order (start first, end last).
    ///
    /// Each leg advances the clock by its duration, plus the dwell of the
    /// stop reached unless it is the end. The deadline of the reached stop
    /// is checked against the clock after dwell. The objective accumulates
    /// leg metrics only.
    pub fn evaluate(&self, order: &[usize]) -> Evaluation {
        let mut clock = self.start_time;
        let mut total_metric = 0u64;
        let mut first_missed = None;
        let last_step = order.len().saturating_sub(2);

        for (step, pair) in order.windows(2).enumerate() {
            let (prev, cur) = (pair[0], pair[1]);
            let leg = self.matrix.get(prev, cur);
            let waypoint = self.itinerary.waypoint(cur);

            clock = clock.plus_seconds(leg.duration_secs);
            if step != last_step {
                clock = clock.plus_seconds(waypoint.dwell_secs);
            }

            if let Some(deadline) = waypoint.deadline {
                if first_missed.is_none() && self.deadline_mode.misses(clock, deadline) {
                    first_missed = Some(cur);
                }
            }

            total_metric = total_metric.saturating_add(self.objective.metric(leg));
        }

        match first_missed {
            Some(first_missed) => Evaluation::Rejected { first_missed },
            None => Evaluation::Accepted(RouteCost {
                total_metric,
                arrival: clock,
            }),
        }
    }

    /// Wraps an intermediate permutation with the start and end indices.
    fn candidate(&self, intermediates: &[usize]) -> Vec<usize> {
        let mut order = Vec::with_capacity(intermediates.len() + 2);
        order.push(0);
        order.extend_from_slice(intermediates);
        order.push(self.itinerary.end_index());
        order
    }

    fn feasible(&self, intermediates: &[usize]) -> Option<FeasibleOrder> {
        let order = self.candidate(intermediates);
        match self.evaluate(&order) {
            Evaluation::Accepted(cost) => Some(FeasibleOrder { order, cost }),
            Evaluation::Rejected { first_missed } => {
                debug!(
                    event = "order_rejected",
                    order = ?order,
                    first_missed = %self.itinerary.waypoint(first_missed).name,
                );
                None
            }
        }
    }
}

/// Lexicographic permutations of a set of indices.
///
/// Input is sorted first, so the same set always enumerates in the same
/// order. An empty set yields one empty permutation.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    exhausted: bool,
}

impl Permutations {
    pub fn new(items: impl IntoIterator<Item = usize>) -> Self {
        let mut current: Vec<usize> = items.into_iter().collect();
        current.sort_unstable();
        Self {
            current,
            exhausted: false,
        }
    }

    /// Advances `current` to the next lexicographic permutation, returning
    /// false once the last one has been passed.
    fn advance(&mut self) -> bool {
        let v = &mut self.current;
        if v.len() < 2 {
            return false;
        }
        let mut i = v.len() - 1;
        while i > 0 && v[i - 1] >= v[i] {
            i -= 1;
        }
        if i == 0 {
            return false;
        }
        let mut j = v.len() - 1;
        while v[j] <= v[i - 1] {
            j -= 1;
        }
        v.swap(i - 1, j);
        v[i..].reverse();
        true
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();
        self.exhausted = !self.advance();
        Some(item)
    }
}

/// Evaluates every permutation of the intermediate stops.
pub fn search(evaluator: &Evaluator<'_>) -> SearchResult {
    let mut result = SearchResult::default();
    for perm in Permutations::new(evaluator.itinerary.intermediate_indices()) {
        result.evaluated += 1;
        if let Some(feasible) = evaluator.feasible(&perm) {
            result.feasible.push(feasible);
        }
    }
    result
}

/// Cheapest feasible order; among equal totals the earliest enumerated.
pub fn select(result: &SearchResult) -> Option<&FeasibleOrder> {
    result.feasible.iter().min_by_key(|f| f.cost.total_metric)
}

/// Same winner as `select(&search(..))`, computed by rayon workers that each
/// own the permutations beginning with one intermediate stop.
///
/// Blocks are numbered in enumeration order, so reducing by
/// `(total_metric, block)` keeps the earliest-enumerated tie winner.
pub fn search_partitioned(evaluator: &Evaluator<'_>) -> (Option<FeasibleOrder>, usize) {
    let intermediates: Vec<usize> = evaluator.itinerary.intermediate_indices().collect();

    let locals: Vec<(usize, Option<FeasibleOrder>, usize)> = intermediates
        .par_iter()
        .enumerate()
        .map(|(block, &head)| {
            let rest = intermediates.iter().copied().filter(|&idx| idx != head);
            let mut best: Option<FeasibleOrder> = None;
            let mut evaluated = 0;
            for tail in Permutations::new(rest) {
                evaluated += 1;
                let mut perm = Vec::with_capacity(tail.len() + 1);
                perm.push(head);
                perm.extend(tail);
                if let Some(candidate) = evaluator.feasible(&perm) {
                    let better = best
                        .as_ref()
                        .is_none_or(|b| candidate.cost.total_metric < b.cost.total_metric);
                    if better {
                        best = Some(candidate);
                    }
                }
            }
            (block, best, evaluated)
        })
        .collect();

    let evaluated: usize = locals.iter().map(|(_, _, count)| count).sum();
    let best = locals
        .into_par_iter()
        .filter_map(|(block, best, _)| best.map(|b| (block, b)))
        .min_by_key(|(block, b)| (b.cost.total_metric, *block))
        .map(|(_, b)| b);

    (best, evaluated)
}

/// Winning order, by name and index, with its totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundRoute {
    pub stops: Vec<String>,
    pub order: Vec<usize>,
    pub objective: Objective,
    pub total_metric: u64,
    pub arrival: ClockTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OptimalRouteResult {
    Found(FoundRoute),
    /// Every order missed at least one deadline.
    NoFeasibleRoute,
}

impl OptimalRouteResult {
    pub fn found(&self) -> Option<&FoundRoute> {
        match self {
            OptimalRouteResult::Found(route) => Some(route),
            OptimalRouteResult::NoFeasibleRoute => None,
        }
    }
}

/// Finds the cheapest order of `itinerary` that meets every deadline when
/// leaving the start at `start_time`.
///
/// `matrix` must be indexed like the itinerary.
pub fn find_optimal_route(
    itinerary: &Itinerary,
    matrix: &TravelMatrix,
    start_time: ClockTime,
    options: &SolveOptions,
) -> Result<OptimalRouteResult, PlanError> {
    if matrix.size() != itinerary.len() {
        return Err(PlanError::MatrixSize {
            expected: itinerary.len(),
            actual: matrix.size(),
        });
    }
    let stops = itinerary.intermediate_indices().len();
    if stops > options.max_intermediate {
        return Err(PlanError::TooManyStops {
            count: stops,
            max: options.max_intermediate,
        });
    }

    info!(
        event = "search_start",
        stops,
        round_trip = itinerary.is_round_trip(),
        objective = ?options.objective,
        parallel = options.parallel,
    );

    let evaluator = Evaluator::new(itinerary, matrix, start_time, options);
    let (best, evaluated, feasible) = if options.parallel && stops > 1 {
        let (best, evaluated) = search_partitioned(&evaluator);
        (best, evaluated, None)
    } else {
        let result = search(&evaluator);
        (select(&result).cloned(), result.evaluated, Some(result.len()))
    };

    let Some(best) = best else {
        info!(event = "search_end", evaluated, feasible = 0usize, result = "no_feasible_route");
        return Ok(OptimalRouteResult::NoFeasibleRoute);
    };

    info!(
        event = "search_end",
        evaluated,
        feasible = ?feasible,
        total_metric = best.cost.total_metric,
        arrival = %best.cost.arrival,
    );

    let names = best
        .order
        .iter()
        .map(|&idx| itinerary.waypoint(idx).name.clone())
        .collect();

    Ok(OptimalRouteResult::Found(FoundRoute {
        stops: names,
        order: best.order,
        objective: options.objective,
        total_metric: best.cost.total_metric,
        arrival: best.cost.arrival,
    }))
}
