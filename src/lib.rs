//! # u-tsp
//!
//! Single-vehicle traveling salesman solver for asymmetric cost matrices:
//! greedy cheapest-arc construction followed by 2-opt (and optional Or-opt)
//! local search.
//!
//! ## Modules
//!
//! - [`distance`] — Distance oracle trait, dense matrix, input validation
//! - [`models`] — Tour representation and reported Solution
//! - [`constructive`] — Construction heuristics (Cheapest Arc, Path Cheapest Arc)
//! - [`local_search`] — Local search (2-opt, Or-opt) with pass/time budgets
//! - [`evaluation`] — Tour cost and solution reporting
//! - [`solver`] — Configuration, staged solver, one-call [`solver::solve`]
//!
//! ## Example
//!
//! ```
//! use u_tsp::distance::DistanceMatrix;
//! use u_tsp::evaluation::format_route;
//! use u_tsp::solver::{solve, SolverConfig};
//!
//! let dm = DistanceMatrix::from_rows(&[
//!     [0, 2, 9, 10],
//!     [1, 0, 6, 4],
//!     [15, 7, 0, 8],
//!     [6, 3, 12, 0],
//! ])
//! .unwrap();
//! let outcome = solve(&dm, 0, &SolverConfig::default()).unwrap();
//! let labels = ["A", "B", "C", "D"];
//! let route = format_route(&outcome.solution, |i| labels.get(i).copied());
//! assert!(route.starts_with("A -> "));
//! assert!(route.ends_with(" -> A"));
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod solver;

pub use error::{Result, RoutingError};
