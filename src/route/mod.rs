//! Route state and objective.
//!
//! A route is a depot-anchored walk. [`RouteState`] is the unit the search
//! mutates and clones; [`ScoreWeights`] parameterizes its objective.

mod score;
mod state;

pub use score::ScoreWeights;
pub use state::{RouteState, RouteSummary};
