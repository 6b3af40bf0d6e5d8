//! Read-only evaluation of tours: total cost, the reported solution record,
//! and label-aware route rendering.

mod reporter;

pub use reporter::{format_route, report, tour_cost};
