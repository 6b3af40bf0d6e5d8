//! Or-opt segment relocation on a closed tour.
//!
//! # Algorithm
//!
//! Tries moving segments of 1, 2, or 3 consecutive nodes between two other
//! adjacent nodes, keeping the segment's direction so asymmetric costs stay
//! exact. For a segment f..l between p and q, moved between x and y:
//!
//! ```text
//! delta = d(x,f) + d(l,y) - d(x,y) - (d(p,f) + d(l,q) - d(p,q))
//! ```
//!
//! # Complexity
//!
//! O(n²) per pass.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use tracing::trace;

use super::config::ImprovementStrategy;
use super::IMPROVEMENT_EPSILON;
use crate::distance::DistanceOracle;
use crate::error::Result;
use crate::models::Tour;

const MAX_SEGMENT_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Relocation {
    first: usize,
    last: usize,
    after: usize,
    delta: f64,
}

/// Runs one Or-opt scan and applies at most one improving relocation.
///
/// Returns the cost change of the applied move, or `None` if nothing
/// improves.
pub(crate) fn or_opt_pass<O: DistanceOracle + ?Sized>(
    tour: &mut Tour,
    oracle: &O,
    strategy: ImprovementStrategy,
) -> Result<Option<f64>> {
    let Some(mv) = find_relocation(tour.as_slice(), oracle, strategy) else {
        return Ok(None);
    };
    tour.move_segment(mv.first, mv.last, mv.after)?;
    trace!(
        first = mv.first,
        last = mv.last,
        after = mv.after,
        delta = mv.delta,
        "or-opt move"
    );
    Ok(Some(mv.delta))
}

fn find_relocation<O: DistanceOracle + ?Sized>(
    order: &[usize],
    oracle: &O,
    strategy: ImprovementStrategy,
) -> Option<Relocation> {
    let n = order.len();
    let mut best: Option<Relocation> = None;

    for seg_len in 1..=MAX_SEGMENT_LEN {
        // At least two nodes must stay outside the segment.
        if n < seg_len + 2 {
            break;
        }
        for start in 0..n {
            let first = order[start];
            let last = order[(start + seg_len - 1) % n];
            let prev = order[(start + n - 1) % n];
            let next = order[(start + seg_len) % n];
            let removal_gain = oracle.arc_cost(prev, first) + oracle.arc_cost(last, next)
                - oracle.arc_cost(prev, next);

            // Outside nodes run from `next` round to `prev`; stopping before
            // `prev` skips the segment's current slot.
            for k in 0..n - seg_len - 1 {
                let at = (start + seg_len + k) % n;
                let (x, y) = (order[at], order[(at + 1) % n]);
                let delta = oracle.arc_cost(x, first) + oracle.arc_cost(last, y)
                    - oracle.arc_cost(x, y)
                    - removal_gain;

                if delta < -IMPROVEMENT_EPSILON && best.map_or(true, |m| delta < m.delta) {
                    best = Some(Relocation {
                        first,
                        last,
                        after: x,
                        delta,
                    });
                    if strategy == ImprovementStrategy::FirstImprovement {
                        return best;
                    }
                }
            }
        }
    }
    best
}
