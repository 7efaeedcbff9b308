//! Graph model and its collaborators.
//!
//! - [`Graph`]: static weighted undirected graph with depot distances
//! - [`edgelist`]: weighted edge-list reader and writer
//! - [`generator`]: random connected test graphs with a feasible range hint

pub mod edgelist;
pub mod generator;
mod model;

pub(crate) use model::Adjacent;
pub use model::{Edge, Graph, DEPOT};
