//! Arc costs between nodes.
//!
//! [`DistanceOracle`] is the only way the solver reads costs. A dense
//! [`DistanceMatrix`] and the closure-backed [`FnOracle`] implement it.

mod matrix;
mod oracle;

pub use matrix::DistanceMatrix;
pub use oracle::{validate_oracle, DistanceOracle, FnOracle};
