//! 2-opt edge exchange on a closed tour.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (a→b) and (c→d) in tour order,
//! reversing the path b..c yields edges (a→c) and (b→d):
//!
//! ```text
//! delta = d(a,c) + d(b,d) - d(a,b) - d(c,d)
//!       + Σ (d(y,x) - d(x,y))   over arcs x→y inside b..c
//! ```
//!
//! The sum is zero for symmetric costs. For asymmetric costs it prices the
//! reversed direction of the inner path. Scanning c forward from b lets the
//! sum grow by one arc per step, so a full pass stays O(n²).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::trace;

use super::config::ImprovementStrategy;
use super::IMPROVEMENT_EPSILON;
use crate::distance::DistanceOracle;
use crate::error::Result;
use crate::models::Tour;

/// A candidate exchange of edges (a→b) and (c→d).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Exchange {
    a: usize,
    b: usize,
    c: usize,
    d: usize,
    delta: f64,
}

/// Runs one 2-opt scan and applies at most one improving move.
///
/// Returns the cost change of the applied move, or `None` when no move
/// improves the tour by more than the tolerance.
pub(crate) fn two_opt_pass<O: DistanceOracle + ?Sized>(
    tour: &mut Tour,
    oracle: &O,
    strategy: ImprovementStrategy,
) -> Result<Option<f64>> {
    let Some(mv) = find_exchange(tour.as_slice(), oracle, strategy) else {
        return Ok(None);
    };
    tour.swap_edges(mv.a, mv.b, mv.c, mv.d)?;
    trace!(a = mv.a, b = mv.b, c = mv.c, d = mv.d, delta = mv.delta, "2-opt move");
    Ok(Some(mv.delta))
}

fn find_exchange<O: DistanceOracle + ?Sized>(
    order: &[usize],
    oracle: &O,
    strategy: ImprovementStrategy,
) -> Option<Exchange> {
    let n = order.len();
    if n < 4 {
        return None;
    }

    let mut best: Option<Exchange> = None;
    for i in 0..n - 2 {
        let (a, b) = (order[i], order[i + 1]);
        let removed_ab = oracle.arc_cost(a, b);
        let mut reversal = 0.0;

        for j in i + 2..n {
            let (prev, c) = (order[j - 1], order[j]);
            reversal += oracle.arc_cost(c, prev) - oracle.arc_cost(prev, c);

            let d = order[(j + 1) % n];
            if d == a {
                continue;
            }
            let delta = oracle.arc_cost(a, c) + oracle.arc_cost(b, d)
                - removed_ab
                - oracle.arc_cost(c, d)
                + reversal;

            if delta < -IMPROVEMENT_EPSILON && best.map_or(true, |m| delta < m.delta) {
                best = Some(Exchange { a, b, c, d, delta });
                if strategy == ImprovementStrategy::FirstImprovement {
                    return best;
                }
            }
        }
    }
    best
}
