//! Range-constrained arc routing.
//!
//! A single vehicle must traverse every edge of a weighted, connected,
//! undirected graph at least once, starting and ending at the depot
//! (node 0), without any excursion from the depot exceeding a given range.
//! This crate searches for such a route heuristically:
//!
//! - **Graph** ([`graph`]): static weighted graph with shortest-path
//!   distances to the depot, plus an edge-list loader and a random
//!   test-graph generator.
//! - **Route state** ([`route`]): a depot-anchored walk with incremental
//!   cost, sub-tour length and edge-coverage bookkeeping.
//! - **Neighborhood** ([`neighborhood`]): every range-feasible forward
//!   extension of a route up to a given depth, plus one retreat.
//! - **Tabu Search** ([`tabu`]): trajectory search with a global and a
//!   per-node tabu memory, aspiration and retreat rules.
//! - **Variable Neighborhood Search** ([`vns`]): trajectory search that
//!   widens the neighborhood radius until it finds an improvement.
//!
//! Neither search is guaranteed to terminate on inputs whose range is too
//! tight; both take an iteration and an optional wall-clock budget and report
//! whether the returned route is a closed tour.
//!
//! # Example
//!
//! ```
//! use u_arcroute::graph::generator::{generate, GeneratorConfig};
//! use u_arcroute::tabu::{TabuConfig, TabuRunner};
//!
//! let generated = generate(&GeneratorConfig::default().with_seed(1)).unwrap();
//! let config = TabuConfig::new(generated.minimal_range).with_max_iterations(500);
//! let result = TabuRunner::run(&generated.graph, &config).unwrap();
//! assert!(result.best.nodes()[0] == 0);
//! ```

pub mod error;
pub mod graph;
pub mod neighborhood;
pub mod route;
pub mod tabu;
pub mod vns;

pub use error::{Result, RouteError};
