//! Tour cost evaluation and solution reporting.

use crate::distance::DistanceOracle;
use crate::error::{Result, RoutingError};
use crate::models::{Solution, Tour};

/// Total cost of the closed tour: every arc in cycle order, including the
/// arc back to the start.
///
/// A single-node tour costs its self-loop, which is zero for a valid oracle.
/// Fails with `IndexOutOfRange` if the tour holds a node the oracle does not
/// know.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::evaluation::tour_cost;
/// use u_tsp::models::Tour;
///
/// let dm = DistanceMatrix::from_rows(&[[0, 2, 9], [9, 0, 3], [4, 9, 0]]).unwrap();
/// let tour = Tour::from_sequence(3, &[0, 1, 2]).unwrap();
/// assert_eq!(tour_cost(&tour, &dm).unwrap(), 9.0);
/// ```
pub fn tour_cost<O: DistanceOracle + ?Sized>(tour: &Tour, oracle: &O) -> Result<f64> {
    let order = tour.as_slice();
    let n = order.len();
    let mut total = 0.0;
    for (k, &from) in order.iter().enumerate() {
        total += oracle.cost(from, order[(k + 1) % n])?;
    }
    Ok(total)
}

/// Produces the solution record for a complete tour, ordered from `depot`.
///
/// Fails with `IncompleteTour` unless the tour covers every node of the
/// oracle, and with `NodeNotFound` / `IndexOutOfRange` for a bad depot.
pub fn report<O: DistanceOracle + ?Sized>(tour: &Tour, oracle: &O, depot: usize) -> Result<Solution> {
    let expected = oracle.num_nodes();
    if tour.len() != expected || !tour.is_complete() {
        return Err(RoutingError::IncompleteTour {
            visited: tour.len(),
            expected,
        });
    }
    let ordered_nodes = tour.to_sequence(depot)?;
    let total_cost = tour_cost(tour, oracle)?;
    Ok(Solution::new(total_cost, ordered_nodes))
}

/// Renders the closed route as `A -> B -> ... -> A`.
///
/// Labels come from the caller; nodes without a label print as their index.
///
/// # Examples
///
/// ```
/// use u_tsp::evaluation::format_route;
/// use u_tsp::models::Solution;
///
/// let names = ["Tamil Nadu", "Kerala"];
/// let sol = Solution::new(260.0, vec![0, 1, 2]);
/// assert_eq!(
///     format_route(&sol, |i| names.get(i).copied()),
///     "Tamil Nadu -> Kerala -> 2 -> Tamil Nadu"
/// );
/// ```
pub fn format_route<F, L>(solution: &Solution, labels: F) -> String
where
    F: Fn(usize) -> Option<L>,
    L: AsRef<str>,
{
    solution
        .closed_route()
        .into_iter()
        .map(|node| match labels(node) {
            Some(label) => label.as_ref().to_owned(),
            None => node.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
