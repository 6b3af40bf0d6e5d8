//! The cost abstraction consumed by construction, local search and reporting.

use crate::error::{Result, RoutingError};

/// A pure node-pair cost function over nodes `[0, num_nodes)`.
///
/// Implementations must be side-effect free and safe to call from several
/// threads at once.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::{DistanceMatrix, DistanceOracle};
/// use u_tsp::RoutingError;
///
/// let dm = DistanceMatrix::from_rows(&[[0u32, 7], [9, 0]]).unwrap();
/// assert_eq!(dm.cost(1, 0), Ok(9.0));
/// assert_eq!(
///     dm.cost(2, 0),
///     Err(RoutingError::IndexOutOfRange { index: 2, size: 2 })
/// );
/// ```
pub trait DistanceOracle: Sync {
    /// Number of nodes this oracle covers.
    fn num_nodes(&self) -> usize;

    /// Cost of the arc `from → to`. Both indices are known to be in range.
    fn arc_cost(&self, from: usize, to: usize) -> f64;

    /// Cost of the arc `from → to`, checking both indices first.
    fn cost(&self, from: usize, to: usize) -> Result<f64> {
        let size = self.num_nodes();
        for index in [from, to] {
            if index >= size {
                return Err(RoutingError::IndexOutOfRange { index, size });
            }
        }
        Ok(self.arc_cost(from, to))
    }
}

impl<O: DistanceOracle + ?Sized> DistanceOracle for &O {
    fn num_nodes(&self) -> usize {
        (**self).num_nodes()
    }

    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        (**self).arc_cost(from, to)
    }
}

/// Wraps a cost closure so it can be handed to the solver directly.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::{DistanceOracle, FnOracle};
///
/// let ring = FnOracle::new(4, |from, to| ((to + 4 - from) % 4) as f64);
/// assert_eq!(ring.cost(3, 0), Ok(1.0));
/// assert_eq!(ring.cost(0, 3), Ok(3.0));
/// ```
pub struct FnOracle<F> {
    num_nodes: usize,
    cost_fn: F,
}

impl<F> FnOracle<F>
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    /// Creates an oracle over `num_nodes` nodes backed by `cost_fn`.
    pub fn new(num_nodes: usize, cost_fn: F) -> Self {
        Self { num_nodes, cost_fn }
    }
}

impl<F> DistanceOracle for FnOracle<F>
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        (self.cost_fn)(from, to)
    }
}

impl<F> std::fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOracle")
            .field("num_nodes", &self.num_nodes)
            .finish_non_exhaustive()
    }
}

/// Checks that an oracle describes a usable cost matrix.
///
/// Every arc must be finite and non-negative and every self-loop must cost
/// zero. An oracle over zero nodes is rejected as well.
pub fn validate_oracle<O: DistanceOracle + ?Sized>(oracle: &O) -> Result<()> {
    let n = oracle.num_nodes();
    if n == 0 {
        return Err(RoutingError::InvalidMatrix("matrix is empty".into()));
    }
    for from in 0..n {
        for to in 0..n {
            check_entry(from, to, oracle.arc_cost(from, to))?;
        }
    }
    Ok(())
}

/// Validates a single matrix entry.
pub(crate) fn check_entry(from: usize, to: usize, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RoutingError::InvalidMatrix(format!(
            "cost {from}->{to} is {value}, expected a finite non-negative value"
        )));
    }
    if from == to && value != 0.0 {
        return Err(RoutingError::InvalidMatrix(format!(
            "diagonal entry {from}->{to} is {value}, expected 0"
        )));
    }
    Ok(())
}
