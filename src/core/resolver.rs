//! Dependency closure and ordering over an [`AgentGraph`].
//!
//! Ordering follows the literal edge direction: for an edge `from -> to`
//! ("from requires to"), `from` is emitted before `to`. This is delegation
//! order, with dependents ahead of what they depend on. [`AgentGraph::load_order`]
//! gives the reverse, dependencies first.

use petgraph::graph::NodeIndex;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::graph::AgentGraph;
use crate::error::{Error, Result};
use crate::{hlog_debug, hlog_trace};

impl AgentGraph {
    /// Every agent transitively reachable from `seeds`, seeds included,
    /// in delegation order.
    ///
    /// # Errors
    /// Fails with [`Error::AgentNotFound`] if a seed or any reachable
    /// dependency is not a known agent, and with a cycle error if the
    /// reachable subset cannot be ordered.
    pub fn resolve_dependencies<S: AsRef<str>>(&self, seeds: &[S]) -> Result<Vec<String>> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();

        for seed in seeds {
            let name = seed.as_ref();
            let idx = self
                .index_of(name)
                .filter(|&idx| self.is_agent(idx))
                .ok_or_else(|| Error::AgentNotFound {
                    name: name.to_string(),
                })?;
            if visited.insert(idx) {
                queue.push_back(idx);
            }
        }

        while let Some(idx) = queue.pop_front() {
            hlog_trace!("resolve: visit {}", self.name_of(idx));
            for next in self.successors(idx) {
                if !self.is_agent(next) {
                    return Err(Error::AgentNotFound {
                        name: self.name_of(next).to_string(),
                    });
                }
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        hlog_debug!(
            "resolve_dependencies: {} seeds reach {} agents",
            seeds.len(),
            visited.len()
        );
        self.order_subset(&visited)
    }

    /// All agents in delegation order.
    ///
    /// # Errors
    /// Returns [`Error::UnorderableGraph`] if the graph contains a cycle.
    /// No partial ordering is returned.
    pub fn full_ordering(&self) -> Result<Vec<String>> {
        let all: HashSet<NodeIndex> = self.agent_indices().collect();
        self.order_subset(&all)
    }

    /// All agents with dependencies ahead of their dependents.
    pub fn load_order(&self) -> Result<Vec<String>> {
        let mut order = self.full_ordering()?;
        order.reverse();
        Ok(order)
    }

    /// Kahn's algorithm restricted to `subset`. Edges leaving the subset
    /// are ignored. Ties resolve in node insertion order.
    fn order_subset(&self, subset: &HashSet<NodeIndex>) -> Result<Vec<String>> {
        let mut members: Vec<NodeIndex> = subset.iter().copied().collect();
        members.sort();

        let mut in_degree: HashMap<NodeIndex, usize> =
            members.iter().map(|&idx| (idx, 0)).collect();
        for &idx in &members {
            for next in self.successors(idx) {
                if let Some(count) = in_degree.get_mut(&next) {
                    *count += 1;
                }
            }
        }

        let mut queue: VecDeque<NodeIndex> = members
            .iter()
            .copied()
            .filter(|idx| in_degree[idx] == 0)
            .collect();
        let mut order = Vec::with_capacity(members.len());

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            hlog_trace!("order: emit {}", self.name_of(idx));
            for next in self.successors(idx) {
                if let Some(count) = in_degree.get_mut(&next) {
                    *count -= 1;
                    hlog_trace!("order: {} in-degree now {}", self.name_of(next), count);
                    if *count == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }

        if order.len() < members.len() {
            let emitted: HashSet<NodeIndex> = order.iter().copied().collect();
            let remaining = members
                .iter()
                .filter(|&&idx| !emitted.contains(&idx))
                .map(|&idx| self.name_of(idx).to_string())
                .collect();
            return Err(Error::UnorderableGraph { remaining });
        }

        Ok(order
            .into_iter()
            .map(|idx| self.name_of(idx).to_string())
            .collect())
    }
}
