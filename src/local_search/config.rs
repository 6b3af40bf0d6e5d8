//! Local search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a pass picks the move it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImprovementStrategy {
    /// Apply the first improving move found, then restart the scan.
    #[default]
    FirstImprovement,
    /// Scan the whole neighborhood and apply its best move. Equal deltas keep
    /// the move found first.
    BestImprovement,
}

/// Configuration for [`LocalSearch`](super::LocalSearch).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::local_search::{ImprovementStrategy, LocalSearchConfig};
///
/// let config = LocalSearchConfig::default()
///     .with_strategy(ImprovementStrategy::BestImprovement)
///     .with_max_passes(50)
///     .with_time_limit(Duration::from_millis(200))
///     .with_or_opt(true);
/// assert_eq!(config.max_passes, Some(50));
/// assert!(config.or_opt);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    /// Move selection rule.
    pub strategy: ImprovementStrategy,
    /// Upper bound on neighborhood scans (None = until converged).
    pub max_passes: Option<usize>,
    /// Wall-clock budget checked between scans (None = unlimited).
    pub time_limit: Option<Duration>,
    /// Also search Or-opt segment relocations once 2-opt stalls.
    pub or_opt: bool,
}

impl LocalSearchConfig {
    /// Sets the move selection rule.
    pub fn with_strategy(mut self, strategy: ImprovementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of neighborhood scans.
    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = Some(n);
        self
    }

    /// Sets a wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Enables or disables the Or-opt neighborhood.
    pub fn with_or_opt(mut self, enabled: bool) -> Self {
        self.or_opt = enabled;
        self
    }
}
