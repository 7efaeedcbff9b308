//! Mutable route state: a depot-anchored walk with incremental bookkeeping.

use crate::error::{Result, RouteError};
use crate::graph::{Adjacent, Graph, DEPOT};

use super::score::ScoreWeights;

/// A walk over the graph that always begins at the depot.
///
/// The state tracks, incrementally:
///
/// - `cost`: weight of every step taken, repeats included
/// - `cycle_length`: weight accumulated since the latest depot visit
/// - `unvisited`: number of edges no step has traversed yet
///
/// Edge coverage is kept as a per-edge count of traversals, so an edge turns
/// uncovered again only when its last traversal is removed. Cost and cycle
/// length are checkpointed after every step, so removal restores them
/// bit for bit instead of subtracting weights back out.
///
/// Cloning is the branching primitive: every search branch owns its copy and
/// mutates it independently. The graph itself is only borrowed.
///
/// # Examples
///
/// ```
/// use u_arcroute::graph::{Edge, Graph};
/// use u_arcroute::route::RouteState;
///
/// let graph = Graph::from_edges(vec![
///     Edge::new(0, 1, 2.0),
///     Edge::new(1, 2, 3.0),
///     Edge::new(2, 0, 4.0),
/// ])
/// .unwrap();
///
/// let mut route = RouteState::new(&graph);
/// route.add_node(1).unwrap();
/// route.add_node(2).unwrap();
/// assert_eq!(route.cost(), 5.0);
/// assert_eq!(route.unvisited(), 1);
///
/// route.add_node(0).unwrap();
/// assert!(route.is_fully_covered() && route.is_at_depot());
/// ```
#[derive(Debug, Clone)]
pub struct RouteState<'g> {
    graph: &'g Graph,
    nodes: Vec<usize>,
    /// Edge id of each step; `steps[i]` joins `nodes[i]` and `nodes[i + 1]`.
    steps: Vec<usize>,
    /// Totals as of each node; `marks[i]` belongs to `nodes[i]`.
    marks: Vec<Mark>,
    unvisited: usize,
    coverage: Vec<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Mark {
    cost: f64,
    cycle_length: f64,
}

impl<'g> RouteState<'g> {
    /// Creates the initial route `[DEPOT]` with every edge uncovered.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            nodes: vec![DEPOT],
            steps: Vec::new(),
            marks: vec![Mark::default()],
            unvisited: graph.edge_count(),
            coverage: vec![0; graph.edge_count()],
        }
    }

    /// The graph this route walks on.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Visited nodes in order, starting with the depot.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Total weight of all steps taken.
    pub fn cost(&self) -> f64 {
        self.mark().cost
    }

    /// Weight accumulated since the latest depot visit.
    pub fn cycle_length(&self) -> f64 {
        self.mark().cycle_length
    }

    fn mark(&self) -> Mark {
        self.marks[self.marks.len() - 1]
    }

    /// Number of edges not yet traversed.
    pub fn unvisited(&self) -> usize {
        self.unvisited
    }

    /// Current position.
    pub fn last_node(&self) -> usize {
        self.nodes[self.nodes.len() - 1]
    }

    /// Node before the current position, if any.
    pub fn previous_node(&self) -> Option<usize> {
        self.nodes.len().checked_sub(2).map(|i| self.nodes[i])
    }

    /// Number of nodes after the depot anchor.
    pub fn len_past_depot(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the route currently stands on the depot.
    pub fn is_at_depot(&self) -> bool {
        self.last_node() == DEPOT
    }

    /// Returns `true` once every edge has been traversed.
    pub fn is_fully_covered(&self) -> bool {
        self.unvisited == 0
    }

    /// Returns `true` if the edge `u`-`v` has been traversed in either
    /// direction. Non-edges are never covered.
    pub fn covers(&self, u: usize, v: usize) -> bool {
        self.graph
            .edge_id(u, v)
            .is_some_and(|id| self.coverage[id] > 0)
    }

    /// Appends `node` to the walk.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownNode`] if `node` is outside the graph,
    /// [`RouteError::NoSuchEdge`] if it is not adjacent to the current
    /// position.
    pub fn add_node(&mut self, node: usize) -> Result<()> {
        if !self.graph.contains(node) {
            return Err(RouteError::UnknownNode { node });
        }
        let last = self.last_node();
        let edge = self
            .graph
            .edge_id(last, node)
            .ok_or(RouteError::NoSuchEdge {
                from: last,
                to: node,
            })?;
        let weight = self.graph.edges()[edge].weight;
        self.push(node, weight, edge);
        Ok(())
    }

    /// Appends a neighbor taken straight from the adjacency list.
    pub(crate) fn push_adjacent(&mut self, adj: &Adjacent) {
        self.push(adj.node, adj.weight, adj.edge);
    }

    fn push(&mut self, node: usize, weight: f64, edge: usize) {
        let prev = self.mark();
        self.marks.push(Mark {
            cost: prev.cost + weight,
            cycle_length: if node == DEPOT {
                0.0
            } else {
                prev.cycle_length + weight
            },
        });
        if self.coverage[edge] == 0 {
            self.unvisited -= 1;
        }
        self.coverage[edge] += 1;
        self.nodes.push(node);
        self.steps.push(edge);
    }

    /// Removes the last `count` nodes.
    ///
    /// Coverage is unwound step by step; cost and cycle length fall back to
    /// the checkpoint of the new last node, which also covers removals that
    /// cross a depot visit. Removing every node past the depot restores the
    /// initial state.
    ///
    /// # Errors
    ///
    /// [`RouteError::Underflow`] if `count` exceeds [`Self::len_past_depot`].
    pub fn remove_trailing_nodes(&mut self, count: usize) -> Result<()> {
        let available = self.len_past_depot();
        if count > available {
            return Err(RouteError::Underflow {
                requested: count,
                available,
            });
        }

        let keep = self.steps.len() - count;
        for edge in self.steps.drain(keep..).rev() {
            self.coverage[edge] -= 1;
            if self.coverage[edge] == 0 {
                self.unvisited += 1;
            }
        }
        self.nodes.truncate(keep + 1);
        self.marks.truncate(keep + 1);
        Ok(())
    }

    /// Lower bound on the sub-tour length if the walk continues to
    /// `candidate` and then returns to the depot by the shortest path.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::weight`] for the step to `candidate`.
    pub fn predicted_cycle_length(&self, candidate: usize) -> Result<f64> {
        let weight = self.graph.weight(self.last_node(), candidate)?;
        Ok(self.cycle_length() + weight + self.graph.distance_from_depot(candidate))
    }

    pub(crate) fn predicted_via(&self, adj: &Adjacent) -> f64 {
        self.cycle_length() + adj.weight + self.graph.distance_from_depot(adj.node)
    }

    /// Objective value, lower is better.
    pub fn score(&self, weights: &ScoreWeights) -> f64 {
        self.cost()
            + self.unvisited as f64 * weights.unvisited_weight
            + self.graph.distance_from_depot(self.last_node()) * weights.distance_weight
    }

    /// Splits the walk at depot visits.
    ///
    /// Each slice starts at a depot occurrence and ends at the next one; a
    /// trailing open excursion is returned as the last slice.
    pub fn subtours(&self) -> Vec<&[usize]> {
        let mut tours = Vec::new();
        let mut start = 0;
        for (i, &node) in self.nodes.iter().enumerate().skip(1) {
            if node == DEPOT {
                tours.push(&self.nodes[start..=i]);
                start = i;
            }
        }
        if start + 1 < self.nodes.len() {
            tours.push(&self.nodes[start..]);
        }
        tours
    }

    /// Owned snapshot of the route, detached from the graph.
    pub fn summary(&self, weights: &ScoreWeights) -> RouteSummary {
        RouteSummary {
            nodes: self.nodes.clone(),
            cost: self.cost(),
            unvisited: self.unvisited,
            score: self.score(weights),
        }
    }
}

/// Route snapshot handed to callers that outlive the graph borrow
/// (rendering, persistence).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSummary {
    /// Visited nodes in order.
    pub nodes: Vec<usize>,
    /// Total step weight.
    pub cost: f64,
    /// Edges never traversed.
    pub unvisited: usize,
    /// Objective value under the weights used for the snapshot.
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{fixtures, Edge};

    fn walk<'g>(graph: &'g Graph, nodes: &[usize]) -> RouteState<'g> {
        let mut route = RouteState::new(graph);
        for &n in nodes {
            route.add_node(n).expect("adjacent");
        }
        route
    }

    #[test]
    fn test_initial_state() {
        let graph = fixtures::cycle4();
        let route = RouteState::new(&graph);
        assert_eq!(route.nodes(), &[0]);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.cycle_length(), 0.0);
        assert_eq!(route.unvisited(), 4);
        assert!(route.is_at_depot());
        assert!(!route.is_fully_covered());
        assert_eq!(route.previous_node(), None);
    }

    #[test]
    fn test_add_node_updates_bookkeeping() {
        let graph = fixtures::cycle4();
        let route = walk(&graph, &[1, 2]);
        assert_eq!(route.nodes(), &[0, 1, 2]);
        assert_eq!(route.cost(), 2.0);
        assert_eq!(route.cycle_length(), 2.0);
        assert_eq!(route.unvisited(), 2);
        assert_eq!(route.previous_node(), Some(1));
        assert!(route.covers(2, 1));
        assert!(!route.covers(2, 3));
    }

    #[test]
    fn test_repeated_edge_keeps_unvisited() {
        let graph = fixtures::cycle4();
        let route = walk(&graph, &[1, 0, 1]);
        assert_eq!(route.unvisited(), 3);
        assert_eq!(route.cost(), 3.0);
        assert_eq!(route.cycle_length(), 1.0);
    }

    #[test]
    fn test_depot_resets_cycle_length() {
        let graph = fixtures::cycle4();
        let route = walk(&graph, &[1, 2, 3, 0]);
        assert_eq!(route.cycle_length(), 0.0);
        assert_eq!(route.cost(), 4.0);
        assert!(route.is_fully_covered());
    }

    #[test]
    fn test_add_node_rejects_non_neighbor() {
        let graph = fixtures::cycle4();
        let mut route = RouteState::new(&graph);
        assert!(matches!(
            route.add_node(2),
            Err(RouteError::NoSuchEdge { from: 0, to: 2 })
        ));
        assert!(matches!(
            route.add_node(17),
            Err(RouteError::UnknownNode { node: 17 })
        ));
        assert_eq!(route.nodes(), &[0]);
    }

    #[test]
    fn test_add_then_remove_restores() {
        let graph = fixtures::bowtie();
        let mut route = walk(&graph, &[1, 2]);
        let (cost, cycle, unvisited) = (route.cost(), route.cycle_length(), route.unvisited());

        route.add_node(1).expect("adjacent");
        route.remove_trailing_nodes(1).expect("enough nodes");

        assert_eq!(route.nodes(), &[0, 1, 2]);
        assert_eq!(route.cost(), cost);
        assert_eq!(route.cycle_length(), cycle);
        assert_eq!(route.unvisited(), unvisited);
    }

    #[test]
    fn test_remove_depot_restores_cycle_length() {
        let graph = fixtures::cycle4();
        let mut route = walk(&graph, &[1, 2, 3, 0]);
        route.remove_trailing_nodes(1).expect("enough nodes");
        assert_eq!(route.nodes(), &[0, 1, 2, 3]);
        assert_eq!(route.cycle_length(), 3.0);
        assert_eq!(route.unvisited(), 1);
    }

    #[test]
    fn test_fractional_weights_restore_exactly() {
        let graph = Graph::from_edges(vec![
            Edge::new(0, 1, 0.1),
            Edge::new(1, 2, 0.2),
            Edge::new(2, 0, 0.3),
        ])
        .expect("valid graph");
        let weights = ScoreWeights::default();

        let mut route = walk(&graph, &[1]);
        let (cost, cycle, score) = (route.cost(), route.cycle_length(), route.score(&weights));
        route.add_node(2).expect("adjacent");
        route.remove_trailing_nodes(1).expect("enough nodes");
        assert_eq!(route.cost(), cost);
        assert_eq!(route.cycle_length(), cycle);
        assert_eq!(route.score(&weights), score);

        route.add_node(2).expect("adjacent");
        route.add_node(0).expect("adjacent");
        route.remove_trailing_nodes(1).expect("enough nodes");
        assert_eq!(route.cycle_length(), 0.1 + 0.2);

        route.remove_trailing_nodes(2).expect("enough nodes");
        assert_eq!(route.nodes(), &[0]);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.cycle_length(), 0.0);
    }

    #[test]
    fn test_remove_across_depot_boundary() {
        let graph = fixtures::bowtie();
        let mut route = walk(&graph, &[1, 0, 3, 4]);
        assert_eq!(route.cycle_length(), 2.0);

        route.remove_trailing_nodes(2).expect("enough nodes");
        assert_eq!(route.nodes(), &[0, 1, 0]);
        assert_eq!(route.cycle_length(), 0.0);

        route.remove_trailing_nodes(1).expect("enough nodes");
        assert_eq!(route.nodes(), &[0, 1]);
        assert_eq!(route.cycle_length(), 1.0);
    }

    #[test]
    fn test_remove_keeps_edge_covered_by_earlier_step() {
        let graph = fixtures::cycle4();
        let mut route = walk(&graph, &[1, 0, 1]);
        route.remove_trailing_nodes(1).expect("enough nodes");
        assert!(route.covers(0, 1));
        assert_eq!(route.unvisited(), 3);

        route.remove_trailing_nodes(1).expect("enough nodes");
        assert!(!route.covers(0, 1));
        assert_eq!(route.unvisited(), 4);
    }

    #[test]
    fn test_remove_everything_restores_initial_state() {
        let graph = fixtures::cycle4();
        let mut route = walk(&graph, &[1, 2, 3, 0, 1]);
        route
            .remove_trailing_nodes(route.len_past_depot())
            .expect("enough nodes");
        assert_eq!(route.nodes(), &[0]);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.unvisited(), 4);
        assert_eq!(route.cycle_length(), 0.0);
    }

    #[test]
    fn test_remove_underflow() {
        let graph = fixtures::cycle4();
        let mut route = walk(&graph, &[1]);
        assert!(matches!(
            route.remove_trailing_nodes(2),
            Err(RouteError::Underflow {
                requested: 2,
                available: 1
            })
        ));
        assert_eq!(route.nodes(), &[0, 1]);
    }

    #[test]
    fn test_predicted_cycle_length() {
        let graph = fixtures::cycle4();
        let route = walk(&graph, &[1]);
        assert_eq!(route.predicted_cycle_length(2).expect("edge"), 4.0);
        assert_eq!(route.predicted_cycle_length(0).expect("edge"), 2.0);
        assert!(route.predicted_cycle_length(3).is_err());
    }

    #[test]
    fn test_score() {
        let graph = fixtures::cycle4();
        let weights = ScoreWeights::default();
        let route = walk(&graph, &[1]);
        assert!((route.score(&weights) - 3002.1).abs() < 1e-9);

        let route = walk(&graph, &[1, 2, 3, 0]);
        assert!((route.score(&weights) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_subtours() {
        let graph = fixtures::bowtie();
        let route = walk(&graph, &[1, 2, 0, 3, 4, 0, 1]);
        assert_eq!(
            route.subtours(),
            vec![&[0, 1, 2, 0][..], &[0, 3, 4, 0][..], &[0, 1][..]]
        );
        assert!(RouteState::new(&graph).subtours().is_empty());
    }

    #[test]
    fn test_summary_detaches_from_graph() {
        let graph = fixtures::triangle();
        let summary = walk(&graph, &[1, 2, 0]).summary(&ScoreWeights::default());
        assert_eq!(summary.nodes, vec![0, 1, 2, 0]);
        assert_eq!(summary.unvisited, 0);
        assert_eq!(summary.cost, 3.0);
        assert_eq!(summary.score, 3.0);
    }
}
