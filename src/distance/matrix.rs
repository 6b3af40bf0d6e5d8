//! Dense distance matrix.

use super::oracle::{check_entry, DistanceOracle};
use crate::error::{Result, RoutingError};

/// A dense, validated n×n cost matrix stored in row-major order.
///
/// Costs may be asymmetric. Construction rejects non-square input, negative
/// or non-finite costs, and non-zero diagonals, so a `DistanceMatrix` always
/// satisfies the [`DistanceOracle`] contract.
///
/// # Examples
///
/// ```
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 130, 192],
///     vec![130, 0, 433],
///     vec![347, 433, 0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(2, 0), 347.0);
/// assert!(!dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Builds a matrix from rows of any numeric type that widens to `f64`.
    ///
    /// Fails with [`RoutingError::InvalidMatrix`] if the input is empty, not
    /// square, or holds an invalid cost.
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[T]>,
        T: Copy + Into<f64>,
    {
        let size = rows.len();
        if size == 0 {
            return Err(RoutingError::InvalidMatrix("matrix is empty".into()));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(RoutingError::InvalidMatrix(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row.iter().map(|&v| v.into()));
        }
        Self::from_data(size, data)
    }

    /// Builds a matrix from an explicit row-major grid.
    ///
    /// Fails with [`RoutingError::InvalidMatrix`] if the data length doesn't
    /// match `size * size` or a cost is invalid.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(RoutingError::InvalidMatrix("matrix is empty".into()));
        }
        if data.len() != size * size {
            return Err(RoutingError::InvalidMatrix(format!(
                "expected {} entries for a {size}x{size} matrix, got {}",
                size * size,
                data.len()
            )));
        }
        for (k, &value) in data.iter().enumerate() {
            check_entry(k / size, k % size, value)?;
        }
        Ok(Self { data, size })
    }

    /// Computes a symmetric Euclidean matrix from planar coordinates.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::from_data(n, data)
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. Use
    /// [`DistanceOracle::cost`] for a checked lookup.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl DistanceOracle for DistanceMatrix {
    fn num_nodes(&self) -> usize {
        self.size
    }

    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}
