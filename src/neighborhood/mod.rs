//! Range-bounded neighborhood of a route.
//!
//! The neighborhood of radius `r` holds every route reachable by exactly `r`
//! forward steps whose predicted sub-tour length stays within the range
//! bound, plus a single retreat that drops the last `r` nodes. The retreat is
//! the only way a search can back out of a dead end.

mod expand;

pub use expand::{neighborhood, Neighborhood};
