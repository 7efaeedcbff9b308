//! Variable Neighborhood Search (VNS) for range-constrained arc routing.
//!
//! Instead of tabu memory, the search escapes local optima by widening the
//! neighborhood radius: when no route within `r` steps improves on the best
//! one, it looks `r + 1` steps ahead. Any improvement resets the radius to 1.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.
//! - Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//!   Principles and applications", *European Journal of Operational Research* 130(3), 449-467.

mod config;
mod runner;

pub use config::VnsConfig;
pub use runner::{VnsResult, VnsRunner};
