//! Resolution of equal-cost choices during construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How construction chooses among candidates with exactly equal cost.
///
/// Candidates are always ordered by unvisited-node index, then by in-tour
/// node index, before the policy is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TieBreakPolicy {
    /// Lowest unvisited index, then lowest in-tour index.
    #[default]
    LowestIndex,
    /// Highest unvisited index, then highest in-tour index.
    HighestIndex,
    /// Uniformly random, reproducible for a given seed.
    Seeded(u64),
}

/// Stateful picker created from a [`TieBreakPolicy`] for a single run.
#[derive(Debug, Clone)]
pub(crate) struct TieBreaker {
    policy: TieBreakPolicy,
    rng: Option<StdRng>,
}

impl TieBreaker {
    pub(crate) fn new(policy: TieBreakPolicy) -> Self {
        let rng = match policy {
            TieBreakPolicy::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };
        Self { policy, rng }
    }

    /// Picks one of `tied`, which must be sorted ascending.
    pub(crate) fn pick<T: Copy>(&mut self, tied: &[T]) -> Option<T> {
        match (self.policy, self.rng.as_mut()) {
            (_, Some(rng)) if !tied.is_empty() => Some(tied[rng.random_range(0..tied.len())]),
            (TieBreakPolicy::HighestIndex, _) => tied.last().copied(),
            _ => tied.first().copied(),
        }
    }
}
