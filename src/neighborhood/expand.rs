//! Pruned branch-and-clone expansion.

use crate::route::RouteState;

/// Candidate routes around a given route.
#[derive(Debug, Clone)]
pub struct Neighborhood<'g> {
    /// Routes after exactly `radius` feasible forward steps, in neighbor
    /// enumeration order.
    pub forward: Vec<RouteState<'g>>,
    /// The route with its last `radius` nodes removed, when it has that many.
    pub backward: Option<RouteState<'g>>,
}

impl<'g> Neighborhood<'g> {
    /// Total number of candidates.
    pub fn len(&self) -> usize {
        self.forward.len() + usize::from(self.backward.is_some())
    }

    /// Returns `true` if there is no candidate at all.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.backward.is_none()
    }

    /// Flattens into a single list with the backward candidate, if any, last.
    pub fn into_candidates(self) -> Vec<RouteState<'g>> {
        let mut candidates = self.forward;
        candidates.extend(self.backward);
        candidates
    }
}

/// Generates the radius-`radius` neighborhood of `state`.
///
/// A forward step to neighbor `n` is taken only while
/// `predicted_cycle_length(n) <= range`; infeasible branches are dropped at
/// the level where they fail, and a branch that cannot reach depth `radius`
/// contributes nothing. A radius of zero yields an empty neighborhood.
///
/// With the `parallel` feature enabled and `parallel == true`, the branches
/// below each neighbor of the current position are expanded on the rayon
/// pool. The result order is the same either way.
///
/// # Examples
///
/// ```
/// use u_arcroute::graph::{Edge, Graph};
/// use u_arcroute::neighborhood::neighborhood;
/// use u_arcroute::route::RouteState;
///
/// let graph = Graph::from_edges(vec![
///     Edge::new(0, 1, 1.0),
///     Edge::new(1, 2, 1.0),
///     Edge::new(2, 0, 1.0),
/// ])
/// .unwrap();
/// let mut route = RouteState::new(&graph);
/// route.add_node(1).unwrap();
///
/// let hood = neighborhood(&route, 1, 3.0, false);
/// assert_eq!(hood.forward.len(), 2);
/// assert_eq!(hood.backward.unwrap().nodes(), &[0]);
/// ```
pub fn neighborhood<'g>(
    state: &RouteState<'g>,
    radius: usize,
    range: f64,
    parallel: bool,
) -> Neighborhood<'g> {
    if radius == 0 {
        return Neighborhood {
            forward: Vec::new(),
            backward: None,
        };
    }

    let forward = forward_branches(state, radius, range, parallel);

    // Underflow is exactly the case with nothing to retreat from.
    let mut retreat = state.clone();
    let backward = retreat.remove_trailing_nodes(radius).ok().map(|()| retreat);

    Neighborhood { forward, backward }
}

fn forward_branches<'g>(
    state: &RouteState<'g>,
    radius: usize,
    range: f64,
    parallel: bool,
) -> Vec<RouteState<'g>> {
    #[cfg(feature = "parallel")]
    if parallel {
        return expand_parallel(state, radius, range);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    expand(state.clone(), radius, range)
}

/// Each frame owns its branch, extends it by one feasible step per neighbor
/// and hands the finished leaves back up.
fn expand(state: RouteState<'_>, depth: usize, range: f64) -> Vec<RouteState<'_>> {
    if depth == 0 {
        return vec![state];
    }

    let graph = state.graph();
    graph
        .adjacent(state.last_node())
        .iter()
        .filter(|adj| state.predicted_via(adj) <= range)
        .flat_map(|adj| {
            let mut branch = state.clone();
            branch.push_adjacent(adj);
            expand(branch, depth - 1, range)
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn expand_parallel<'g>(state: &RouteState<'g>, depth: usize, range: f64) -> Vec<RouteState<'g>> {
    use rayon::prelude::*;

    let graph = state.graph();
    graph
        .adjacent(state.last_node())
        .par_iter()
        .filter(|adj| state.predicted_via(adj) <= range)
        .flat_map_iter(|adj| {
            let mut branch = state.clone();
            branch.push_adjacent(adj);
            expand(branch, depth - 1, range)
        })
        .collect()
}
