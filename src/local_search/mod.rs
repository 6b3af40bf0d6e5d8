//! Local search for improving a complete tour.
//!
//! - [`two_opt`] — Edge exchange with path reversal, asymmetric-aware
//! - [`or_opt`] — Relocation of 1–3 node segments
//! - [`LocalSearch`] — Driver with first/best improvement and pass/time budgets

mod config;
mod improver;
mod or_opt;
mod two_opt;

pub use config::{ImprovementStrategy, LocalSearchConfig};
pub use improver::{LocalSearch, SearchStats, StopReason};

/// Minimum cost decrease for a move to count as an improvement.
pub(crate) const IMPROVEMENT_EPSILON: f64 = 1e-10;
