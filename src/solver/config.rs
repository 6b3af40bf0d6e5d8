//! Solver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constructive::{ConstructionStrategy, TieBreakPolicy};
use crate::local_search::{ImprovementStrategy, LocalSearchConfig};

/// Options recognized by [`TspSolver`](super::TspSolver) and
/// [`solve`](super::solve).
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::ImprovementStrategy;
/// use u_tsp::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_improvement_strategy(ImprovementStrategy::BestImprovement)
///     .with_max_local_search_passes(100);
/// assert_eq!(config.max_local_search_passes, Some(100));
/// assert!(!config.or_opt);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Heuristic building the initial tour.
    pub construction: ConstructionStrategy,
    /// Resolution of equal-cost construction choices.
    pub tie_break_policy: TieBreakPolicy,
    /// Move selection during local search.
    pub improvement_strategy: ImprovementStrategy,
    /// Cap on local search passes (None = until converged).
    pub max_local_search_passes: Option<usize>,
    /// Wall-clock budget for local search (None = unlimited).
    pub time_limit: Option<Duration>,
    /// Add the Or-opt neighborhood to local search.
    pub or_opt: bool,
}

impl SolverConfig {
    /// Sets the construction heuristic.
    pub fn with_construction(mut self, strategy: ConstructionStrategy) -> Self {
        self.construction = strategy;
        self
    }

    /// Sets the tie-break policy.
    pub fn with_tie_break_policy(mut self, policy: TieBreakPolicy) -> Self {
        self.tie_break_policy = policy;
        self
    }

    /// Sets the improvement strategy.
    pub fn with_improvement_strategy(mut self, strategy: ImprovementStrategy) -> Self {
        self.improvement_strategy = strategy;
        self
    }

    /// Caps the number of local search passes.
    pub fn with_max_local_search_passes(mut self, n: usize) -> Self {
        self.max_local_search_passes = Some(n);
        self
    }

    /// Sets a local search time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enables or disables Or-opt.
    pub fn with_or_opt(mut self, enabled: bool) -> Self {
        self.or_opt = enabled;
        self
    }

    /// The local search part of this configuration.
    pub fn local_search_config(&self) -> LocalSearchConfig {
        LocalSearchConfig {
            strategy: self.improvement_strategy,
            max_passes: self.max_local_search_passes,
            time_limit: self.time_limit,
            or_opt: self.or_opt,
        }
    }
}
