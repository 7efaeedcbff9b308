//! Random connected test graphs.
//!
//! Graphs follow the Watts–Strogatz small-world construction: a ring
//! lattice where every node is joined to its `neighbors / 2` nearest ring
//! successors, after which each lattice edge is rewired to a random endpoint
//! with probability `rewire_probability`. Construction is retried until the
//! result is connected. Edge weights are uniform random integers in
//! `1..=max_weight`.
//!
//! # Reference
//!
//! Watts, D. J. & Strogatz, S. H. (1998). "Collective dynamics of
//! 'small-world' networks", *Nature* 393, 440-442.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{Edge, Graph};
use crate::error::{Result, RouteError};

/// Parameters of the random graph generator.
///
/// # Examples
///
/// ```
/// use u_arcroute::graph::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_nodes(20)
///     .with_neighbors(4)
///     .with_max_weight(9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of nodes, depot included.
    pub nodes: usize,
    /// Ring-lattice degree before rewiring.
    pub neighbors: usize,
    /// Probability of rewiring each lattice edge.
    pub rewire_probability: f64,
    /// Largest edge weight. Weights are drawn from `1..=max_weight`.
    pub max_weight: u32,
    /// Attempts at producing a connected graph before giving up.
    pub max_tries: usize,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: 10,
            neighbors: 4,
            rewire_probability: 0.5,
            max_weight: 10,
            max_tries: 100,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the number of nodes.
    pub fn with_nodes(mut self, n: usize) -> Self {
        self.nodes = n;
        self
    }

    /// Sets the ring-lattice degree.
    pub fn with_neighbors(mut self, k: usize) -> Self {
        self.neighbors = k;
        self
    }

    /// Sets the rewiring probability.
    pub fn with_rewire_probability(mut self, p: f64) -> Self {
        self.rewire_probability = p;
        self
    }

    /// Sets the largest edge weight.
    pub fn with_max_weight(mut self, w: u32) -> Self {
        self.max_weight = w;
        self
    }

    /// Sets the number of connection attempts.
    pub fn with_max_tries(mut self, n: usize) -> Self {
        self.max_tries = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.nodes < 3 {
            return Err("nodes must be at least 3".into());
        }
        if self.neighbors < 2 || self.neighbors >= self.nodes {
            return Err("neighbors must be in 2..nodes".into());
        }
        if !(0.0..=1.0).contains(&self.rewire_probability) {
            return Err("rewire_probability must be in [0, 1]".into());
        }
        if self.max_weight == 0 {
            return Err("max_weight must be at least 1".into());
        }
        if self.max_tries == 0 {
            return Err("max_tries must be at least 1".into());
        }
        Ok(())
    }
}

/// A generated graph together with its sizing hint.
#[derive(Debug, Clone)]
pub struct GeneratedGraph {
    /// The connected graph.
    pub graph: Graph,
    /// Smallest range bound for which every edge fits in some sub-tour.
    pub minimal_range: f64,
}

/// Generates a random connected graph.
///
/// # Errors
///
/// [`RouteError::InvalidConfig`] for a rejected configuration,
/// [`RouteError::GenerationFailed`] if no attempt produced a connected graph.
pub fn generate(config: &GeneratorConfig) -> Result<GeneratedGraph> {
    config.validate().map_err(RouteError::InvalidConfig)?;

    let mut rng = match config.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rand::random()),
    };

    for attempt in 0..config.max_tries {
        let pairs = watts_strogatz(
            config.nodes,
            config.neighbors,
            config.rewire_probability,
            &mut rng,
        );
        let edges: Vec<Edge> = pairs
            .into_iter()
            .map(|(u, v)| Edge::new(u, v, f64::from(rng.random_range(1..=config.max_weight))))
            .collect();

        match Graph::from_edges(edges) {
            Ok(graph) => {
                let minimal_range = minimal_range(&graph);
                log::debug!(
                    "generated graph with {} nodes, {} edges after {} attempt(s), minimal range {}",
                    graph.node_count(),
                    graph.edge_count(),
                    attempt + 1,
                    minimal_range
                );
                return Ok(GeneratedGraph {
                    graph,
                    minimal_range,
                });
            }
            Err(RouteError::Disconnected { .. }) => continue,
            Err(e) => return Err(e),
        }
    }

    Err(RouteError::GenerationFailed {
        tries: config.max_tries,
    })
}

/// Smallest range bound that lets a sub-tour cover every edge.
///
/// Covering edge `(u, v)` takes at least `d(u) + w + d(v)`, or an out-and-
/// back over the edge from its nearer endpoint; the bound is the largest such
/// requirement over all edges.
pub fn minimal_range(graph: &Graph) -> f64 {
    graph
        .edges()
        .iter()
        .map(|e| {
            let du = graph.distance_from_depot(e.from);
            let dv = graph.distance_from_depot(e.to);
            (2.0 * (du.min(dv) + e.weight)).min(du + dv + e.weight)
        })
        .fold(0.0, f64::max)
}

/// Ring lattice with random rewiring. Returns unordered pairs `(min, max)`.
fn watts_strogatz<R: Rng>(n: usize, k: usize, p: f64, rng: &mut R) -> Vec<(usize, usize)> {
    let key = |u: usize, v: usize| if u <= v { (u, v) } else { (v, u) };

    let mut edges = BTreeSet::new();
    let mut degree = vec![0usize; n];
    for j in 1..=k / 2 {
        for u in 0..n {
            let v = (u + j) % n;
            if edges.insert(key(u, v)) {
                degree[u] += 1;
                degree[v] += 1;
            }
        }
    }

    for j in 1..=k / 2 {
        for u in 0..n {
            if !rng.random_bool(p) || degree[u] >= n - 1 {
                continue;
            }
            let v = (u + j) % n;
            let mut w = rng.random_range(0..n);
            while w == u || edges.contains(&key(u, w)) {
                w = rng.random_range(0..n);
            }
            if edges.remove(&key(u, v)) {
                degree[v] -= 1;
                degree[w] += 1;
                edges.insert(key(u, w));
            }
        }
    }

    edges.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    #[test]
    fn test_generate_is_reproducible() {
        let config = GeneratorConfig::default().with_nodes(12).with_seed(42);
        let a = generate(&config).expect("generated");
        let b = generate(&config).expect("generated");
        assert_eq!(a.graph.edges(), b.graph.edges());
        assert_eq!(a.minimal_range, b.minimal_range);
    }

    #[test]
    fn test_generate_preserves_lattice_edge_count() {
        let config = GeneratorConfig::default()
            .with_nodes(15)
            .with_neighbors(4)
            .with_seed(3);
        let generated = generate(&config).expect("generated");
        assert_eq!(generated.graph.node_count(), 15);
        assert_eq!(generated.graph.edge_count(), 15 * 2);
    }

    #[test]
    fn test_generate_weights_in_range() {
        let config = GeneratorConfig::default().with_max_weight(3).with_seed(9);
        let generated = generate(&config).expect("generated");
        for e in generated.graph.edges() {
            assert!(e.weight >= 1.0 && e.weight <= 3.0, "weight {}", e.weight);
            assert_eq!(e.weight.fract(), 0.0);
        }
    }

    #[test]
    fn test_no_rewiring_gives_ring_lattice() {
        let config = GeneratorConfig::default()
            .with_nodes(6)
            .with_neighbors(2)
            .with_rewire_probability(0.0)
            .with_seed(1);
        let generated = generate(&config).expect("generated");
        for u in 0..6 {
            assert_eq!(generated.graph.degree(u), 2);
            assert!(generated.graph.edge_id(u, (u + 1) % 6).is_some());
        }
    }

    #[test]
    fn test_minimal_range_of_cycle() {
        assert_eq!(minimal_range(&fixtures::cycle4()), 4.0);
        assert_eq!(minimal_range(&fixtures::triangle()), 3.0);
    }

    #[test]
    fn test_tiny_graphs_rejected() {
        let config = GeneratorConfig::default().with_nodes(1).with_neighbors(0);
        assert!(matches!(
            generate(&config),
            Err(RouteError::InvalidConfig(_))
        ));
        let config = GeneratorConfig::default().with_nodes(4).with_neighbors(4);
        assert!(config.validate().is_err());
    }
}
