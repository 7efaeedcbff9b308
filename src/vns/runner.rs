//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the route `[depot]`
//! 2. Set r = 1
//! 3. While the best route is not a closed full-coverage tour:
//!    a. Take the best-scored route of the radius-r neighborhood
//!    b. If it beats the best route, accept it and reset r = 1;
//!    otherwise r = r + 1
//!    c. If r exceeds `max_radius`, stop
//!
//! Only improving moves are accepted, so the current route and the best
//! route coincide throughout.
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::time::Instant;

use super::config::VnsConfig;
use crate::error::{Result, RouteError};
use crate::graph::Graph;
use crate::neighborhood::neighborhood;
use crate::route::RouteState;
use crate::tabu::{is_closed_tour, time_exceeded};

/// Result of a VNS run.
#[derive(Debug, Clone)]
pub struct VnsResult<'g> {
    /// Best route found.
    pub best: RouteState<'g>,
    /// Score of the best route.
    pub best_score: f64,
    /// Total neighborhood evaluations.
    pub iterations: usize,
    /// Evaluation at which the best route was found.
    pub best_iteration: usize,
    /// Score of the initial route followed by the score of every accepted
    /// move.
    pub score_history: Vec<f64>,
    /// Whether the best route covers every edge and ends at the depot.
    pub completed: bool,
    /// Whether the run ended because no radius up to `max_radius` improved.
    pub stagnated: bool,
    /// Widest radius evaluated.
    pub widest_radius: usize,
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes VNS on the given graph.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidConfig`] if the configuration does not validate,
    /// [`RouteError::InfeasibleRange`] if a radius-1 neighborhood comes back
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_arcroute::graph::{Edge, Graph};
    /// use u_arcroute::vns::{VnsConfig, VnsRunner};
    ///
    /// let graph = Graph::from_edges(vec![
    ///     Edge::new(0, 1, 1.0),
    ///     Edge::new(1, 2, 1.0),
    ///     Edge::new(2, 0, 1.0),
    /// ])
    /// .unwrap();
    ///
    /// let result = VnsRunner::run(&graph, &VnsConfig::new(3.0)).unwrap();
    /// assert!(result.completed);
    /// assert_eq!(result.best.nodes(), &[0, 1, 2, 0]);
    /// ```
    pub fn run<'g>(graph: &'g Graph, config: &VnsConfig) -> Result<VnsResult<'g>> {
        config.validate().map_err(RouteError::InvalidConfig)?;
        let weights = &config.weights;
        let started = Instant::now();

        let mut best = RouteState::new(graph);
        let mut best_score = best.score(weights);
        let mut best_iteration = 0;
        let mut score_history = vec![best_score];

        let mut iterations = 0;
        let mut widest_radius = 0;
        let mut stagnated = false;
        let mut completed = is_closed_tour(&best);

        'outer: while !completed {
            let mut radius = 1;
            loop {
                if iterations >= config.max_iterations
                    || time_exceeded(started, config.time_limit_ms)
                {
                    log::warn!(
                        "vns stopped after {} evaluations with {} edges uncovered",
                        iterations,
                        best.unvisited()
                    );
                    break 'outer;
                }
                if radius > config.max_radius {
                    stagnated = true;
                    log::warn!(
                        "vns found no improvement up to radius {} at node {}",
                        config.max_radius,
                        best.last_node()
                    );
                    break 'outer;
                }
                iterations += 1;
                widest_radius = widest_radius.max(radius);

                let hood = neighborhood(&best, radius, config.range, config.parallel);
                if radius == 1 && hood.is_empty() {
                    return Err(RouteError::InfeasibleRange {
                        range: config.range,
                        node: best.last_node(),
                    });
                }

                let leader = hood
                    .into_candidates()
                    .into_iter()
                    .map(|route| (route.score(weights), route))
                    .min_by(|a, b| a.0.total_cmp(&b.0));

                if let Some((score, route)) = leader {
                    if score < best_score {
                        best = route;
                        best_score = score;
                        best_iteration = iterations;
                        score_history.push(best_score);
                        log::debug!(
                            "evaluation {}: radius {} improved to {} ({} edges uncovered)",
                            iterations,
                            radius,
                            best_score,
                            best.unvisited()
                        );
                        break;
                    }
                }
                radius += 1;
            }
            completed = is_closed_tour(&best);
        }

        if completed {
            log::info!(
                "vns closed the tour after {} evaluations, cost {}",
                iterations,
                best.cost()
            );
        }

        Ok(VnsResult {
            best,
            best_score,
            iterations,
            best_iteration,
            score_history,
            completed,
            stagnated,
            widest_radius,
        })
    }
}
