//! Local search driver: repeats neighborhood scans until the tour is a local
//! optimum or a budget runs out.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::config::LocalSearchConfig;
use super::or_opt::or_opt_pass;
use super::two_opt::two_opt_pass;
use crate::distance::DistanceOracle;
use crate::error::{Result, RoutingError};
use crate::evaluation::tour_cost;
use crate::models::Tour;

/// Why a local search run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A full scan of every enabled neighborhood found no improving move.
    Converged,
    /// `max_passes` scans were performed.
    PassLimit,
    /// The wall-clock budget expired.
    TimeLimit,
}

/// Outcome of a local search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Neighborhood scans performed.
    pub passes: usize,
    /// Improving moves applied.
    pub moves: usize,
    /// Tour cost before the run.
    pub initial_cost: f64,
    /// Tour cost after the run.
    pub final_cost: f64,
    /// What ended the run.
    pub stop_reason: StopReason,
}

impl SearchStats {
    /// Cost reduction achieved (never negative).
    pub fn improvement(&self) -> f64 {
        self.initial_cost - self.final_cost
    }
}

/// Improves complete tours in place with 2-opt and, optionally, Or-opt.
///
/// Each scan of a neighborhood is one pass. With first improvement a pass
/// ends at the first improving move; with best improvement it covers the
/// whole neighborhood and applies its best move. Or-opt only runs once a
/// 2-opt scan comes back empty, and any applied move restarts from 2-opt.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{LocalSearch, LocalSearchConfig, StopReason};
/// use u_tsp::models::Tour;
///
/// let dm = DistanceMatrix::from_coordinates(&[
///     (0.0, 0.0),
///     (1.0, 0.0),
///     (1.0, 1.0),
///     (0.0, 1.0),
/// ])
/// .unwrap();
/// let mut tour = Tour::from_sequence(4, &[0, 2, 1, 3]).unwrap();
/// let stats = LocalSearch::new(&dm, LocalSearchConfig::default())
///     .improve(&mut tour)
///     .unwrap();
/// assert_eq!(stats.moves, 1);
/// assert_eq!(stats.stop_reason, StopReason::Converged);
/// assert!((stats.final_cost - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug)]
pub struct LocalSearch<'a, O: ?Sized> {
    oracle: &'a O,
    config: LocalSearchConfig,
}

impl<'a, O: DistanceOracle + ?Sized> LocalSearch<'a, O> {
    /// Creates a local search over `oracle`.
    pub fn new(oracle: &'a O, config: LocalSearchConfig) -> Self {
        Self { oracle, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Runs local search on `tour` until convergence or a budget is hit.
    ///
    /// Fails with `IncompleteTour` unless `tour` covers every node of the
    /// oracle.
    #[instrument(skip_all, level = "debug", fields(nodes = tour.len()))]
    pub fn improve(&self, tour: &mut Tour) -> Result<SearchStats> {
        let expected = self.oracle.num_nodes();
        if tour.len() != expected || !tour.is_complete() {
            return Err(RoutingError::IncompleteTour {
                visited: tour.len(),
                expected,
            });
        }

        let started = Instant::now();
        let initial_cost = tour_cost(tour, self.oracle)?;
        let mut passes = 0;
        let mut moves = 0;

        let stop_reason = loop {
            if let Some(reason) = self.budget_exhausted(passes, started) {
                break reason;
            }
            passes += 1;
            if two_opt_pass(tour, self.oracle, self.config.strategy)?.is_some() {
                moves += 1;
                continue;
            }
            if !self.config.or_opt {
                break StopReason::Converged;
            }

            if let Some(reason) = self.budget_exhausted(passes, started) {
                break reason;
            }
            passes += 1;
            if or_opt_pass(tour, self.oracle, self.config.strategy)?.is_some() {
                moves += 1;
                continue;
            }
            break StopReason::Converged;
        };

        let final_cost = tour_cost(tour, self.oracle)?;
        debug!(
            passes,
            moves,
            initial_cost,
            final_cost,
            ?stop_reason,
            "local search finished"
        );
        Ok(SearchStats {
            passes,
            moves,
            initial_cost,
            final_cost,
            stop_reason,
        })
    }

    fn budget_exhausted(&self, passes: usize, started: Instant) -> Option<StopReason> {
        if self.config.max_passes.is_some_and(|max| passes >= max) {
            return Some(StopReason::PassLimit);
        }
        if self
            .config
            .time_limit
            .is_some_and(|limit| started.elapsed() >= limit)
        {
            return Some(StopReason::TimeLimit);
        }
        None
    }
}
