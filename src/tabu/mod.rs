//! Tabu Search (TS) for range-constrained arc routing.
//!
//! A single-route trajectory search over radius-1 neighborhoods. A two-level
//! memory (a global set of forbidden destinations and a per-node list of
//! forbidden successors) keeps the walk from cycling, while aspiration and
//! retreat rules let it escape when every move is forbidden.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use runner::{Selection, TabuResult, TabuRunner};

pub(crate) use runner::{is_closed_tour, time_exceeded};
