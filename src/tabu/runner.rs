//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the route `[depot]`, with the depot globally tabu
//! 2. At each iteration:
//!    a. Generate the radius-1 neighborhood
//!    b. Select the best forward move that is tabu at neither level,
//!    adjusting the depot ban while scanning; break tabu for a move that
//!    improves the best route, otherwise retreat one node
//!    c. Record the move in both memory levels
//!    d. On a new best, clear the global set (and everything, if the new
//!    best closes a sub-tour); on a fruitless return to the depot, clear
//!    the local lists except the depot's
//! 3. Stop once the best route covers every edge and ends at the depot
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.

use std::time::Instant;

use super::config::TabuConfig;
use super::memory::TabuMemory;
use crate::error::{Result, RouteError};
use crate::graph::{Graph, DEPOT};
use crate::neighborhood::{neighborhood, Neighborhood};
use crate::route::{RouteState, ScoreWeights};

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Best-scored forward move that no tabu entry forbids.
    Admissible,
    /// Tabu move taken because it improves the best route.
    Aspiration,
    /// Every forward move was tabu and none improved: back off one node.
    Retreat,
    /// Every forward move was tabu, none improved and the route had nothing
    /// to retreat from: the best-scored forward move is taken regardless.
    Forced,
}

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<'g> {
    /// Best route found.
    pub best: RouteState<'g>,
    /// Score of the best route.
    pub best_score: f64,
    /// Total moves executed.
    pub iterations: usize,
    /// Iteration at which the best route was found.
    pub best_iteration: usize,
    /// Best score after each iteration.
    pub score_history: Vec<f64>,
    /// Whether the best route covers every edge and ends at the depot.
    /// `false` means the budget ran out first.
    pub completed: bool,
    /// Moves taken through aspiration.
    pub aspiration_moves: usize,
    /// Retreat moves.
    pub retreats: usize,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given graph.
    ///
    /// # Errors
    ///
    /// [`RouteError::InvalidConfig`] if the configuration does not validate,
    /// [`RouteError::InfeasibleRange`] if a route is reached that has no
    /// candidate move at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_arcroute::graph::{Edge, Graph};
    /// use u_arcroute::tabu::{TabuConfig, TabuRunner};
    ///
    /// let graph = Graph::from_edges(vec![
    ///     Edge::new(0, 1, 1.0),
    ///     Edge::new(1, 2, 1.0),
    ///     Edge::new(2, 3, 1.0),
    ///     Edge::new(3, 0, 1.0),
    /// ])
    /// .unwrap();
    ///
    /// let result = TabuRunner::run(&graph, &TabuConfig::new(4.0)).unwrap();
    /// assert!(result.completed);
    /// assert_eq!(result.best.nodes(), &[0, 1, 2, 3, 0]);
    /// ```
    pub fn run<'g>(graph: &'g Graph, config: &TabuConfig) -> Result<TabuResult<'g>> {
        config.validate().map_err(RouteError::InvalidConfig)?;
        let weights = &config.weights;
        let started = Instant::now();

        let mut current = RouteState::new(graph);
        let mut best = current.clone();
        let mut best_score = best.score(weights);
        let mut best_iteration = 0;

        let mut memory = TabuMemory::new(graph.node_count());
        let mut score_history = Vec::new();
        let mut aspiration_moves = 0;
        let mut retreats = 0;
        let mut iterations = 0;
        let mut completed = is_closed_tour(&best);

        while !completed {
            if iterations >= config.max_iterations || time_exceeded(started, config.time_limit_ms) {
                log::warn!(
                    "tabu search stopped after {} iterations with {} edges uncovered",
                    iterations,
                    best.unvisited()
                );
                break;
            }
            iterations += 1;

            let last = current.last_node();
            let hood = neighborhood(&current, 1, config.range, config.parallel);
            let (next, selection) = select_best(hood, best_score, weights, &mut memory, last)
                .ok_or(RouteError::InfeasibleRange {
                    range: config.range,
                    node: last,
                })?;

            match selection {
                Selection::Aspiration => {
                    aspiration_moves += 1;
                    log::trace!("aspiration move to {}", next.last_node());
                }
                Selection::Retreat => {
                    retreats += 1;
                    log::trace!("retreat from {} to {}", last, next.last_node());
                }
                Selection::Forced => log::trace!("forced move to {}", next.last_node()),
                Selection::Admissible => {}
            }

            current = next;
            memory.record_move(current.previous_node(), current.last_node());

            let score = current.score(weights);
            if score < best_score {
                memory.clear_global();
                best = current.clone();
                best_score = score;
                best_iteration = iterations;
                log::debug!(
                    "iteration {}: new best {} ({} edges uncovered)",
                    iterations,
                    best_score,
                    best.unvisited()
                );
                if best.is_at_depot() {
                    memory.successful_cycle_reset();
                }
            } else if current.is_at_depot() {
                memory.unsuccessful_cycle_reset();
            }

            score_history.push(best_score);
            completed = is_closed_tour(&best);
        }

        if completed {
            log::info!(
                "tabu search closed the tour after {} iterations, cost {}",
                iterations,
                best.cost()
            );
        }

        Ok(TabuResult {
            best,
            best_score,
            iterations,
            best_iteration,
            score_history,
            completed,
            aspiration_moves,
            retreats,
        })
    }
}

pub(crate) fn is_closed_tour(route: &RouteState<'_>) -> bool {
    route.is_fully_covered() && route.is_at_depot()
}

pub(crate) fn time_exceeded(started: Instant, limit_ms: Option<u64>) -> bool {
    limit_ms.is_some_and(|ms| started.elapsed().as_millis() >= u128::from(ms))
}

/// Picks the next route from a radius-1 neighborhood.
///
/// Forward candidates are scanned in ascending score order (ties keep
/// enumeration order). While scanning, the depot is re-allowed for every
/// candidate that beats `best_score` and forbidden for every candidate that
/// is worse. The first candidate whose destination is tabu at neither level
/// wins. Failing that, the best forward candidate is still taken if it beats
/// `best_score`; otherwise `current_last` is released and the backward
/// candidate is returned.
///
/// Returns `None` only for an empty neighborhood.
pub(crate) fn select_best<'g>(
    hood: Neighborhood<'g>,
    best_score: f64,
    weights: &ScoreWeights,
    memory: &mut TabuMemory,
    current_last: usize,
) -> Option<(RouteState<'g>, Selection)> {
    let Neighborhood { forward, backward } = hood;

    let mut scored: Vec<(f64, RouteState<'g>)> = forward
        .into_iter()
        .map(|route| (route.score(weights), route))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut admissible = None;
    for (i, (score, candidate)) in scored.iter().enumerate() {
        if *score < best_score {
            memory.allow(DEPOT);
        } else if *score > best_score {
            memory.forbid(DEPOT);
        }
        if !memory.is_tabu(candidate.previous_node(), candidate.last_node()) {
            admissible = Some(i);
            break;
        }
    }
    if let Some(i) = admissible {
        return Some((scored.swap_remove(i).1, Selection::Admissible));
    }

    let leader_improves = scored.first().is_some_and(|(score, _)| *score < best_score);
    if leader_improves {
        return scored
            .into_iter()
            .next()
            .map(|(_, route)| (route, Selection::Aspiration));
    }

    if let Some(retreat) = backward {
        memory.release(current_last);
        return Some((retreat, Selection::Retreat));
    }

    scored
        .into_iter()
        .next()
        .map(|(_, route)| (route, Selection::Forced))
}
