//! Reported solution record.

use serde::{Deserialize, Serialize};

/// A finished tour: its total cost and the visiting order from the depot.
///
/// `ordered_nodes` starts at the depot and lists every node once. The closing
/// arc back to the depot is implied and included in `total_cost`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Solution;
///
/// let sol = Solution::new(12.0, vec![0, 2, 1]);
/// assert_eq!(sol.depot(), Some(0));
/// assert_eq!(sol.closed_route(), vec![0, 2, 1, 0]);
/// assert_eq!(sol.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    total_cost: f64,
    ordered_nodes: Vec<usize>,
}

impl Solution {
    /// Creates a solution record.
    pub fn new(total_cost: f64, ordered_nodes: Vec<usize>) -> Self {
        Self {
            total_cost,
            ordered_nodes,
        }
    }

    /// Sum of arc costs around the closed tour.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Visiting order, depot first.
    pub fn ordered_nodes(&self) -> &[usize] {
        &self.ordered_nodes
    }

    /// The depot, i.e. the first node.
    pub fn depot(&self) -> Option<usize> {
        self.ordered_nodes.first().copied()
    }

    /// Number of nodes visited.
    pub fn len(&self) -> usize {
        self.ordered_nodes.len()
    }

    /// Returns `true` if no node is visited.
    pub fn is_empty(&self) -> bool {
        self.ordered_nodes.is_empty()
    }

    /// Visiting order with the depot repeated at the end.
    pub fn closed_route(&self) -> Vec<usize> {
        let mut route = self.ordered_nodes.clone();
        route.extend(self.depot());
        route
    }
}
