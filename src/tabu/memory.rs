//! Two-level tabu memory.

use std::collections::HashSet;

use crate::graph::DEPOT;

/// Short-term memory of the arc-routing Tabu Search.
///
/// - **Global**: destination nodes that may not be entered at all. Mostly
///   used to forbid or re-allow returning to the depot.
/// - **Local**: for each node, the successors that may not be chosen when
///   departing from it.
///
/// Entries carry no tenure; they live until one of the reset rules clears
/// them.
#[derive(Debug, Clone)]
pub struct TabuMemory {
    global: HashSet<usize>,
    local: Vec<HashSet<usize>>,
}

impl TabuMemory {
    /// Fresh memory for a graph with `node_count` nodes: the depot is
    /// globally tabu, every local list is empty.
    pub fn new(node_count: usize) -> Self {
        Self {
            global: HashSet::from([DEPOT]),
            local: vec![HashSet::new(); node_count],
        }
    }

    /// Returns `true` if `node` may not be entered.
    pub fn is_global_tabu(&self, node: usize) -> bool {
        self.global.contains(&node)
    }

    /// Returns `true` if moving `from -> to` is locally forbidden.
    pub fn is_local_tabu(&self, from: usize, to: usize) -> bool {
        self.local.get(from).is_some_and(|s| s.contains(&to))
    }

    /// Returns `true` if a move into `to`, departing from `from`, is tabu
    /// at either level.
    pub fn is_tabu(&self, from: Option<usize>, to: usize) -> bool {
        self.is_global_tabu(to) || from.is_some_and(|f| self.is_local_tabu(f, to))
    }

    /// Globally forbids entering `node`.
    pub fn forbid(&mut self, node: usize) {
        self.global.insert(node);
    }

    /// Lifts the global ban on `node`.
    pub fn allow(&mut self, node: usize) {
        self.global.remove(&node);
    }

    /// Forbids moving `from -> to`.
    pub fn forbid_successor(&mut self, from: usize, to: usize) {
        if let Some(set) = self.local.get_mut(from) {
            set.insert(to);
        }
    }

    /// Records a performed move into `to`.
    pub fn record_move(&mut self, from: Option<usize>, to: usize) {
        self.forbid(to);
        if let Some(from) = from {
            self.forbid_successor(from, to);
        }
    }

    /// Lifts every ban tied to `node`: its global entry and its local list.
    pub fn release(&mut self, node: usize) {
        self.global.remove(&node);
        if let Some(set) = self.local.get_mut(node) {
            set.clear();
        }
    }

    /// Clears the global set.
    pub fn clear_global(&mut self) {
        self.global.clear();
    }

    /// Reset after a sub-tour closed with a new best: forget everything,
    /// then forbid the depot so the next sub-tour does not close empty.
    pub fn successful_cycle_reset(&mut self) {
        for set in &mut self.local {
            set.clear();
        }
        self.global.clear();
        self.global.insert(DEPOT);
    }

    /// Reset after returning to the depot without improvement: every local
    /// list except the depot's own is cleared.
    pub fn unsuccessful_cycle_reset(&mut self) {
        for (node, set) in self.local.iter_mut().enumerate() {
            if node != DEPOT {
                set.clear();
            }
        }
    }

    /// Globally forbidden nodes.
    pub fn global(&self) -> &HashSet<usize> {
        &self.global
    }

    /// Forbidden successors of `node`, if `node` is known.
    pub fn local(&self, node: usize) -> Option<&HashSet<usize>> {
        self.local.get(node)
    }
}
