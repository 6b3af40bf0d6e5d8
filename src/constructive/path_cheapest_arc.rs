//! Path-cheapest-arc constructive heuristic.
//!
//! Grows a single path from the depot: the current path end always extends
//! along its cheapest arc to an unvisited node, and the path closes back to
//! the depot once every node is placed. This is the nearest-neighbor rule
//! applied to directed arcs.
//!
//! # Complexity
//!
//! O(n²) arc evaluations.

use tracing::{debug, instrument, trace};

use super::tie_break::{TieBreakPolicy, TieBreaker};
use crate::distance::DistanceOracle;
use crate::error::{Result, RoutingError};
use crate::models::Tour;

/// Builds a complete tour by always leaving the path end on its cheapest arc.
///
/// Equal-cost candidates are ordered by node index and resolved by
/// `tie_break`. Fails with `IndexOutOfRange` if `depot` is not a node of the
/// oracle, and with `IncompleteTour` if the path end has no comparable arc
/// to any unvisited node.
///
/// # Examples
///
/// ```
/// use u_tsp::constructive::{path_cheapest_arc, TieBreakPolicy};
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     [0, 10, 1],
///     [1, 0, 10],
///     [10, 1, 0],
/// ])
/// .unwrap();
/// let tour = path_cheapest_arc(&dm, 0, TieBreakPolicy::LowestIndex).unwrap();
/// assert_eq!(tour.to_sequence(0).unwrap(), vec![0, 2, 1]);
/// ```
#[instrument(skip_all, level = "debug", fields(nodes = oracle.num_nodes(), depot = depot))]
pub fn path_cheapest_arc<O: DistanceOracle + ?Sized>(
    oracle: &O,
    depot: usize,
    tie_break: TieBreakPolicy,
) -> Result<Tour> {
    let n = oracle.num_nodes();
    let mut tour = Tour::new(n, depot)?;
    let mut breaker = TieBreaker::new(tie_break);
    let mut unvisited: Vec<usize> = (0..n).filter(|&u| u != depot).collect();
    let mut tied: Vec<usize> = Vec::new();
    let mut current = depot;

    while !unvisited.is_empty() {
        let best = unvisited
            .iter()
            .map(|&u| oracle.arc_cost(current, u))
            .fold(f64::INFINITY, f64::min);

        tied.clear();
        tied.extend(
            unvisited
                .iter()
                .copied()
                .filter(|&u| oracle.arc_cost(current, u) == best),
        );
        let Some(next) = breaker.pick(&tied) else {
            return Err(RoutingError::IncompleteTour {
                visited: tour.len(),
                expected: n,
            });
        };

        tour.insert_after(current, next)?;
        trace!(from = current, to = next, arc = best, "extended path");
        unvisited.retain(|&u| u != next);
        current = next;
    }

    debug!(len = tour.len(), "path-cheapest-arc construction finished");
    Ok(tour)
}
