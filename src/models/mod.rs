//! Domain model types for the tour problem.
//!
//! A [`Tour`] is the mutable cycle worked on by construction and local
//! search; a [`Solution`] is the read-only record reported at the end.

mod solution;
mod tour;

pub use solution::Solution;
pub use tour::Tour;
