//! Error type shared by every stage of the solver.

use thiserror::Error;

/// Failures surfaced by the distance oracle, tour operations, and the solver.
///
/// Every variant reflects a violated precondition. None is transient, so
/// callers should not retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// A node index outside `[0, size)`.
    #[error("node index {index} out of range for {size} nodes")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Number of nodes.
        size: usize,
    },

    /// The node is not part of the tour.
    #[error("node {0} is not in the tour")]
    NodeNotFound(usize),

    /// The node is already part of the tour.
    #[error("node {0} is already in the tour")]
    NodeAlreadyPresent(usize),

    /// The edges (a→b) and (c→d) do not form a valid 2-opt exchange.
    #[error("edges ({a}->{b}) and ({c}->{d}) cannot be exchanged")]
    InvalidEdgePair {
        /// Tail of the first edge.
        a: usize,
        /// Head of the first edge.
        b: usize,
        /// Tail of the second edge.
        c: usize,
        /// Head of the second edge.
        d: usize,
    },

    /// The segment `first..=last` cannot be moved after `after`.
    #[error("segment {first}..={last} cannot be moved after node {after}")]
    InvalidSegment {
        /// First node of the segment.
        first: usize,
        /// Last node of the segment.
        last: usize,
        /// Node the segment should follow.
        after: usize,
    },

    /// The cost input is malformed.
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),

    /// The tour does not cover every node.
    #[error("tour visits {visited} of {expected} nodes")]
    IncompleteTour {
        /// Nodes currently in the tour.
        visited: usize,
        /// Nodes the tour must cover.
        expected: usize,
    },

    /// The solver was driven through a transition its state does not allow.
    #[error("cannot move solver from {from} to {to}")]
    InvalidTransition {
        /// State the solver was in.
        from: &'static str,
        /// State that was requested.
        to: &'static str,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
