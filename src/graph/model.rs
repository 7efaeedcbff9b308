//! Static weighted undirected graph with precomputed depot distances.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::error::{Result, RouteError};

/// Identifier of the depot node. Every sub-tour starts and ends here.
pub const DEPOT: usize = 0;

/// An undirected weighted edge as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// First endpoint.
    pub from: usize,
    /// Second endpoint.
    pub to: usize,
    /// Traversal cost, finite and strictly positive.
    pub weight: f64,
}

impl Edge {
    /// Creates an edge between `from` and `to`.
    pub fn new(from: usize, to: usize, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// One entry of a node's adjacency list.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Adjacent {
    pub(crate) node: usize,
    pub(crate) weight: f64,
    pub(crate) edge: usize,
}

/// A connected, positively weighted, undirected graph rooted at [`DEPOT`].
///
/// Nodes are the dense range `0..node_count()`. Adjacency lists keep edge
/// insertion order, which is the neighbor enumeration order every search
/// component relies on for tie-breaking.
///
/// The shortest-path distance from the depot to every node is computed once
/// in [`Graph::from_edges`] and never changes afterwards.
///
/// # Examples
///
/// ```
/// use u_arcroute::graph::{Edge, Graph};
///
/// let graph = Graph::from_edges(vec![
///     Edge::new(0, 1, 1.0),
///     Edge::new(1, 2, 1.0),
///     Edge::new(2, 3, 1.0),
///     Edge::new(3, 0, 1.0),
/// ])
/// .unwrap();
/// assert_eq!(graph.edge_count(), 4);
/// assert_eq!(graph.distance_from_depot(2), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Adjacent>>,
    index: HashMap<(usize, usize), usize>,
    distance: Vec<f64>,
}

impl Graph {
    /// Builds a graph from an edge list and precomputes depot distances.
    ///
    /// # Errors
    ///
    /// - [`RouteError::EmptyGraph`] if `edges` is empty
    /// - [`RouteError::InvalidWeight`] for a non-finite or non-positive weight
    /// - [`RouteError::SelfLoop`] / [`RouteError::DuplicateEdge`] for
    ///   malformed edge sets
    /// - [`RouteError::Disconnected`] if some node cannot reach the depot,
    ///   including ids that no edge touches
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().collect();
        let max_id = edges
            .iter()
            .map(|e| e.from.max(e.to))
            .max()
            .ok_or(RouteError::EmptyGraph)?;

        // Every edge touches at most two ids, so a larger id range leaves some
        // node isolated. Reject it before sizing the adjacency table.
        let node_count = match max_id.checked_add(1) {
            Some(n) if n <= 2 * edges.len() => n,
            _ => {
                return Err(RouteError::Disconnected {
                    node: first_untouched(&edges, max_id),
                })
            }
        };

        let mut adjacency = vec![Vec::new(); node_count];
        let mut index = HashMap::with_capacity(edges.len());

        for (id, e) in edges.iter().enumerate() {
            if !e.weight.is_finite() || e.weight <= 0.0 {
                return Err(RouteError::InvalidWeight {
                    from: e.from,
                    to: e.to,
                    weight: e.weight,
                });
            }
            if e.from == e.to {
                return Err(RouteError::SelfLoop { node: e.from });
            }
            if index.insert(edge_key(e.from, e.to), id).is_some() {
                return Err(RouteError::DuplicateEdge {
                    from: e.from,
                    to: e.to,
                });
            }
            adjacency[e.from].push(Adjacent {
                node: e.to,
                weight: e.weight,
                edge: id,
            });
            adjacency[e.to].push(Adjacent {
                node: e.from,
                weight: e.weight,
                edge: id,
            });
        }

        let distance = shortest_paths(&adjacency, DEPOT);
        if let Some(node) = distance.iter().position(|d| d.is_infinite()) {
            return Err(RouteError::Disconnected { node });
        }

        Ok(Self {
            edges,
            adjacency,
            index,
            distance,
        })
    }

    /// Number of nodes, including the depot.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in insertion order. The position of an edge is its id.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if `node` is part of the graph.
    pub fn contains(&self, node: usize) -> bool {
        node < self.adjacency.len()
    }

    /// Id of the edge joining `u` and `v`, in either orientation.
    pub fn edge_id(&self, u: usize, v: usize) -> Option<usize> {
        self.index.get(&edge_key(u, v)).copied()
    }

    /// Weight of the edge joining `u` and `v`.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownNode`] if either node is outside the graph,
    /// [`RouteError::NoSuchEdge`] if they are not adjacent.
    pub fn weight(&self, u: usize, v: usize) -> Result<f64> {
        for node in [u, v] {
            if !self.contains(node) {
                return Err(RouteError::UnknownNode { node });
            }
        }
        self.edge_id(u, v)
            .map(|id| self.edges[id].weight)
            .ok_or(RouteError::NoSuchEdge { from: u, to: v })
    }

    /// Neighbors of `u` in enumeration order. Empty for unknown nodes.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(u)
            .into_iter()
            .flatten()
            .map(|adj| adj.node)
    }

    /// Number of edges incident to `u`.
    pub fn degree(&self, u: usize) -> usize {
        self.adjacency.get(u).map_or(0, Vec::len)
    }

    /// Shortest-path cost from the depot to `u`.
    ///
    /// # Panics
    ///
    /// Panics if `u` is not part of the graph.
    pub fn distance_from_depot(&self, u: usize) -> f64 {
        self.distance[u]
    }

    pub(crate) fn adjacent(&self, u: usize) -> &[Adjacent] {
        &self.adjacency[u]
    }
}

fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Heap entry for Dijkstra, ordered so that `BinaryHeap` pops the cheapest.
#[derive(Debug, Clone, Copy)]
struct Visit {
    cost: f64,
    node: usize,
}

impl PartialEq for Visit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Visit {}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Visit {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Single-source shortest paths. Unreachable nodes stay at infinity.
fn shortest_paths(adjacency: &[Vec<Adjacent>], source: usize) -> Vec<f64> {
    let mut distance = vec![f64::INFINITY; adjacency.len()];
    if source >= adjacency.len() {
        return distance;
    }

    let mut heap = BinaryHeap::new();
    distance[source] = 0.0;
    heap.push(Visit {
        cost: 0.0,
        node: source,
    });

    while let Some(Visit { cost, node }) = heap.pop() {
        if cost > distance[node] {
            continue;
        }
        for adj in &adjacency[node] {
            let next = cost + adj.weight;
            if next < distance[adj.node] {
                distance[adj.node] = next;
                heap.push(Visit {
                    cost: next,
                    node: adj.node,
                });
            }
        }
    }

    distance
}

/// Smallest non-depot id in `1..=max_id` without an incident edge. When all
/// of them are touched the depot is the isolated one, which leaves node 1
/// unreachable.
fn first_untouched(edges: &[Edge], max_id: usize) -> usize {
    let touched: HashSet<usize> = edges.iter().flat_map(|e| [e.from, e.to]).collect();
    (1..=max_id).find(|n| !touched.contains(n)).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    #[test]
    fn test_cycle_distances() {
        let graph = fixtures::cycle4();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.distance_from_depot(0), 0.0);
        assert_eq!(graph.distance_from_depot(1), 1.0);
        assert_eq!(graph.distance_from_depot(2), 2.0);
        assert_eq!(graph.distance_from_depot(3), 1.0);
    }

    #[test]
    fn test_distance_takes_cheapest_path() {
        let graph = Graph::from_edges(vec![
            Edge::new(0, 1, 10.0),
            Edge::new(0, 2, 1.0),
            Edge::new(2, 1, 2.0),
        ])
        .expect("valid graph");
        assert_eq!(graph.distance_from_depot(1), 3.0);
    }

    #[test]
    fn test_weight_lookup_both_orientations() {
        let graph = fixtures::cycle4();
        assert_eq!(graph.weight(0, 3).expect("edge"), 1.0);
        assert_eq!(graph.weight(3, 0).expect("edge"), 1.0);
        assert_eq!(graph.edge_id(3, 0), graph.edge_id(0, 3));
    }

    #[test]
    fn test_weight_missing_edge() {
        let graph = fixtures::cycle4();
        assert!(matches!(
            graph.weight(0, 2),
            Err(RouteError::NoSuchEdge { from: 0, to: 2 })
        ));
        assert!(matches!(
            graph.weight(0, 9),
            Err(RouteError::UnknownNode { node: 9 })
        ));
    }

    #[test]
    fn test_neighbors_keep_insertion_order() {
        let graph = fixtures::cycle4();
        assert_eq!(graph.neighbors(0).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(graph.neighbors(42).count(), 0);
        assert_eq!(graph.degree(0), 2);
    }

    #[test]
    fn test_depot_only_graph_rejected() {
        assert!(matches!(
            Graph::from_edges(Vec::new()),
            Err(RouteError::EmptyGraph)
        ));
    }

    #[test]
    fn test_disconnected_rejected() {
        let result = Graph::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(2, 3, 1.0)]);
        assert!(matches!(result, Err(RouteError::Disconnected { node: 2 })));
    }

    #[test]
    fn test_depot_without_edges_rejected() {
        let result = Graph::from_edges(vec![Edge::new(1, 2, 1.0)]);
        assert!(matches!(result, Err(RouteError::Disconnected { node: 1 })));
    }

    #[test]
    fn test_huge_node_ids_rejected_without_allocating() {
        let result = Graph::from_edges(vec![Edge::new(0, usize::MAX, 1.0)]);
        assert!(matches!(result, Err(RouteError::Disconnected { node: 1 })));

        let result = Graph::from_edges(vec![
            Edge::new(0, 1, 1.0),
            Edge::new(1, 1_000_000_000_000, 1.0),
        ]);
        assert!(matches!(result, Err(RouteError::Disconnected { node: 2 })));
    }

    #[test]
    fn test_sparse_ids_report_first_gap() {
        let result = Graph::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(1, 5, 1.0)]);
        assert!(matches!(result, Err(RouteError::Disconnected { node: 2 })));
    }

    #[test]
    fn test_malformed_edges_rejected() {
        assert!(matches!(
            Graph::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(1, 0, 2.0)]),
            Err(RouteError::DuplicateEdge { from: 1, to: 0 })
        ));
        assert!(matches!(
            Graph::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(1, 1, 2.0)]),
            Err(RouteError::SelfLoop { node: 1 })
        ));
        assert!(matches!(
            Graph::from_edges(vec![Edge::new(0, 1, 0.0)]),
            Err(RouteError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Graph::from_edges(vec![Edge::new(0, 1, f64::NAN)]),
            Err(RouteError::InvalidWeight { .. })
        ));
    }
}
