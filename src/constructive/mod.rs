//! Constructive heuristics for building an initial tour.
//!
//! - [`cheapest_arc`] — Cheapest arc from the tour into any unvisited node, O(n²)
//! - [`path_cheapest_arc`] — Cheapest arc out of the current path end, O(n²)

mod cheapest_arc;
mod path_cheapest_arc;
mod tie_break;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceOracle;
use crate::error::Result;
use crate::models::Tour;

pub use cheapest_arc::cheapest_arc;
pub use path_cheapest_arc::path_cheapest_arc;
pub use tie_break::TieBreakPolicy;

/// Which constructive heuristic builds the initial tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConstructionStrategy {
    /// See [`cheapest_arc`].
    #[default]
    CheapestArc,
    /// See [`path_cheapest_arc`].
    PathCheapestArc,
}

impl ConstructionStrategy {
    /// Runs the selected heuristic.
    pub fn build<O: DistanceOracle + ?Sized>(
        self,
        oracle: &O,
        depot: usize,
        tie_break: TieBreakPolicy,
    ) -> Result<Tour> {
        match self {
            Self::CheapestArc => cheapest_arc(oracle, depot, tie_break),
            Self::PathCheapestArc => path_cheapest_arc(oracle, depot, tie_break),
        }
    }
}
