//! Construction → improvement → reporting pipeline.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::config::SolverConfig;
use crate::distance::{validate_oracle, DistanceOracle};
use crate::error::{Result, RoutingError};
use crate::evaluation::{self, tour_cost};
use crate::local_search::{LocalSearch, SearchStats};
use crate::models::{Solution, Tour};

/// Lifecycle of a [`TspSolver`].
///
/// `Uninitialized → Constructed → Improved* → Reported`. Improvement may run
/// any number of times; `reset` starts over from `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// No tour yet.
    Uninitialized,
    /// An initial tour has been built.
    Constructed,
    /// Local search has run at least once.
    Improved,
    /// The solution has been reported.
    Reported,
}

impl SolverState {
    fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Constructed => "Constructed",
            Self::Improved => "Improved",
            Self::Reported => "Reported",
        }
    }
}

/// Step-by-step TSP solver over a validated oracle.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::solver::{SolverConfig, SolverState, TspSolver};
///
/// let dm = DistanceMatrix::from_rows(&[
///     [0, 2, 9, 10],
///     [1, 0, 6, 4],
///     [15, 7, 0, 8],
///     [6, 3, 12, 0],
/// ])
/// .unwrap();
/// let mut solver = TspSolver::new(&dm, 0, SolverConfig::default()).unwrap();
/// let built = solver.construct().unwrap();
/// let stats = solver.improve().unwrap();
/// let solution = solver.report().unwrap();
///
/// assert_eq!(solver.state(), SolverState::Reported);
/// assert_eq!(solution.ordered_nodes()[0], 0);
/// assert!(solution.total_cost() <= built);
/// assert_eq!(stats.final_cost, solution.total_cost());
/// ```
#[derive(Debug)]
pub struct TspSolver<'a, O: ?Sized> {
    oracle: &'a O,
    depot: usize,
    config: SolverConfig,
    state: SolverState,
    tour: Option<Tour>,
}

impl<'a, O: DistanceOracle + ?Sized> TspSolver<'a, O> {
    /// Validates the input and creates an uninitialized solver.
    ///
    /// Fails with `InvalidMatrix` for bad costs and `IndexOutOfRange` for a
    /// depot outside the oracle.
    pub fn new(oracle: &'a O, depot: usize, config: SolverConfig) -> Result<Self> {
        validate_oracle(oracle)?;
        let size = oracle.num_nodes();
        if depot >= size {
            return Err(RoutingError::IndexOutOfRange { index: depot, size });
        }
        Ok(Self {
            oracle,
            depot,
            config,
            state: SolverState::Uninitialized,
            tour: None,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// The working tour, once constructed.
    pub fn tour(&self) -> Option<&Tour> {
        self.tour.as_ref()
    }

    /// The depot node.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Builds the initial tour and returns its cost.
    pub fn construct(&mut self) -> Result<f64> {
        self.expect_state(&[SolverState::Uninitialized], SolverState::Constructed)?;
        let tour =
            self.config
                .construction
                .build(self.oracle, self.depot, self.config.tie_break_policy)?;
        let cost = tour_cost(&tour, self.oracle)?;
        debug!(cost, strategy = ?self.config.construction, "tour constructed");
        self.tour = Some(tour);
        self.state = SolverState::Constructed;
        Ok(cost)
    }

    /// Runs local search on the working tour.
    pub fn improve(&mut self) -> Result<SearchStats> {
        self.expect_state(
            &[SolverState::Constructed, SolverState::Improved],
            SolverState::Improved,
        )?;
        let search = LocalSearch::new(self.oracle, self.config.local_search_config());
        let tour = self.tour.as_mut().ok_or(RoutingError::InvalidTransition {
            from: self.state.name(),
            to: SolverState::Improved.name(),
        })?;
        let stats = search.improve(tour)?;
        self.state = SolverState::Improved;
        Ok(stats)
    }

    /// Reports the current tour as a solution starting at the depot.
    pub fn report(&mut self) -> Result<Solution> {
        self.expect_state(
            &[SolverState::Constructed, SolverState::Improved],
            SolverState::Reported,
        )?;
        let tour = self.tour.as_ref().ok_or(RoutingError::InvalidTransition {
            from: self.state.name(),
            to: SolverState::Reported.name(),
        })?;
        let solution = evaluation::report(tour, self.oracle, self.depot)?;
        self.state = SolverState::Reported;
        Ok(solution)
    }

    /// Discards the tour so the solver can run again.
    pub fn reset(&mut self) {
        self.tour = None;
        self.state = SolverState::Uninitialized;
    }

    fn expect_state(&self, allowed: &[SolverState], to: SolverState) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(RoutingError::InvalidTransition {
                from: self.state.name(),
                to: to.name(),
            })
        }
    }
}

/// Result of a full [`solve`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// The reported solution.
    pub solution: Solution,
    /// Cost of the constructed tour before local search.
    pub construction_cost: f64,
    /// Local search statistics.
    pub search: SearchStats,
}

/// Validates the input, builds a tour, improves it, and reports it.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::solver::{solve, SolverConfig};
///
/// let dm = DistanceMatrix::from_rows(&[[0, 4], [6, 0]]).unwrap();
/// let outcome = solve(&dm, 0, &SolverConfig::default()).unwrap();
/// assert_eq!(outcome.solution.ordered_nodes(), &[0, 1]);
/// assert_eq!(outcome.solution.total_cost(), 10.0);
/// ```
#[instrument(skip_all, level = "debug", fields(nodes = oracle.num_nodes(), depot = depot))]
pub fn solve<O: DistanceOracle + ?Sized>(
    oracle: &O,
    depot: usize,
    config: &SolverConfig,
) -> Result<SolveOutcome> {
    let mut solver = TspSolver::new(oracle, depot, config.clone())?;
    let construction_cost = solver.construct()?;
    let search = solver.improve()?;
    let solution = solver.report()?;
    info!(
        construction_cost,
        total_cost = solution.total_cost(),
        moves = search.moves,
        "tour solved"
    );
    Ok(SolveOutcome {
        solution,
        construction_cost,
        search,
    })
}
