//! Error types shared by the graph model, route state and search runners.

use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, RouteError>;

/// Errors raised while building graphs, mutating routes or running a search.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A step or weight lookup between two nodes that share no edge.
    #[error("no edge between node {from} and node {to}")]
    NoSuchEdge {
        /// Departure node.
        from: usize,
        /// Destination node.
        to: usize,
    },

    /// A node identifier outside the graph.
    #[error("node {node} is not part of the graph")]
    UnknownNode {
        /// Offending identifier.
        node: usize,
    },

    /// The range bound leaves the search without any candidate move.
    ///
    /// Raised when a neighborhood comes back completely empty, which means
    /// no round trip through the current position fits into the range.
    #[error("range {range} is too small: no feasible move from node {node}")]
    InfeasibleRange {
        /// Configured range bound.
        range: f64,
        /// Last node of the route when the neighborhood came back empty.
        node: usize,
    },

    /// More nodes were requested for removal than the route holds past the depot.
    #[error("cannot remove {requested} nodes, only {available} past the depot")]
    Underflow {
        /// Number of nodes the caller asked to remove.
        requested: usize,
        /// Number of nodes past the depot anchor.
        available: usize,
    },

    /// The graph has no edges (a depot-only graph cannot be routed).
    #[error("graph has no edges")]
    EmptyGraph,

    /// An edge weight that is not a finite positive number.
    #[error("edge {from}-{to} has invalid weight {weight}")]
    InvalidWeight {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
        /// Rejected weight.
        weight: f64,
    },

    /// An edge that starts and ends at the same node.
    #[error("self loop at node {node}")]
    SelfLoop {
        /// Node carrying the loop.
        node: usize,
    },

    /// The same unordered node pair was given twice.
    #[error("duplicate edge {from}-{to}")]
    DuplicateEdge {
        /// First endpoint.
        from: usize,
        /// Second endpoint.
        to: usize,
    },

    /// A node cannot be reached from the depot.
    #[error("node {node} is not reachable from the depot")]
    Disconnected {
        /// First unreachable node found.
        node: usize,
    },

    /// A malformed line in a weighted edge list.
    #[error("line {line}: {message}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// Reading or writing an edge list failed.
    #[error("edge list I/O failed")]
    Io {
        /// Source error from std I/O.
        #[from]
        source: std::io::Error,
    },

    /// Writing an edge list through the CSV writer failed.
    #[error("edge list CSV output failed")]
    Csv {
        /// Source error from the CSV writer.
        #[from]
        source: csv::Error,
    },

    /// A configuration rejected by its `validate` method.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The generator could not produce a connected graph.
    #[error("no connected graph after {tries} tries")]
    GenerationFailed {
        /// Number of attempts made.
        tries: usize,
    },
}
