//! Structural checks over an [`AgentGraph`].
//!
//! Two passes always run: every dependency reference must name a known
//! agent, and the graph must be acyclic.

use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::HashSet;

use crate::core::graph::AgentGraph;
use crate::error::{Error, Result};
use crate::{hlog_debug, hlog_trace};

/// A dependency name that does not resolve to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingReference {
    pub agent: String,
    pub dependency: String,
}

/// Findings from both validation passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Unresolved references in agent insertion order.
    pub missing: Vec<MissingReference>,
    /// DFS path from the search root to the repeated agent, if any.
    pub cycle: Option<Vec<String>>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.cycle.is_none()
    }

    /// The error a failed validation reports. A cycle outranks missing
    /// references, so any cyclic graph fails with a cycle error.
    pub fn into_result(self) -> Result<()> {
        if let Some(path) = self.cycle {
            return Err(Error::CycleDetected { path });
        }
        if let Some(first) = self.missing.into_iter().next() {
            return Err(Error::MissingDependency {
                agent: first.agent,
                dependency: first.dependency,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

impl AgentGraph {
    /// Check references and acyclicity. See [`ValidationReport::into_result`]
    /// for which error wins when both passes find something.
    pub fn validate(&self) -> Result<()> {
        self.validation_report().into_result()
    }

    /// Run both passes and collect everything they find.
    pub fn validation_report(&self) -> ValidationReport {
        let report = ValidationReport {
            missing: self.missing_references(),
            cycle: self.find_cycle(),
        };
        hlog_debug!(
            "validate: {} missing references, cycle={}",
            report.missing.len(),
            report.cycle.is_some()
        );
        report
    }

    fn missing_references(&self) -> Vec<MissingReference> {
        let mut missing = Vec::new();
        for agent in self.agents() {
            let mut seen: HashSet<&str> = HashSet::new();
            let declared = agent.metadata.dependencies.iter().map(String::as_str);
            let recorded = self.dependencies(&agent.name);
            for dep in declared.chain(recorded) {
                if seen.insert(dep) && !self.contains(dep) {
                    missing.push(MissingReference {
                        agent: agent.name.clone(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }
        missing
    }

    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut marks = vec![Mark::Unvisited; self.graph.node_count()];
        for root in self.agent_indices() {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }
            let mut path = Vec::new();
            if let Some(repeated) = self.dfs(root, &mut marks, &mut path) {
                let mut witness: Vec<String> = path
                    .iter()
                    .map(|&idx| self.name_of(idx).to_string())
                    .collect();
                witness.push(self.name_of(repeated).to_string());
                return Some(witness);
            }
        }
        None
    }

    /// Returns the node that closed a cycle, leaving `path` as the stack
    /// from the root down to the node that pointed back at it.
    fn dfs(
        &self,
        idx: NodeIndex,
        marks: &mut [Mark],
        path: &mut Vec<NodeIndex>,
    ) -> Option<NodeIndex> {
        marks[idx.index()] = Mark::OnStack;
        path.push(idx);
        hlog_trace!("dfs: enter {} (depth {})", self.name_of(idx), path.len());

        for next in self.successors(idx) {
            if !self.is_agent(next) {
                continue;
            }
            match marks[next.index()] {
                Mark::OnStack => {
                    hlog_trace!("dfs: back edge {} -> {}", self.name_of(idx), self.name_of(next));
                    return Some(next);
                }
                Mark::Unvisited => {
                    if let Some(repeated) = self.dfs(next, marks, path) {
                        return Some(repeated);
                    }
                }
                Mark::Done => {}
            }
        }

        path.pop();
        marks[idx.index()] = Mark::Done;
        hlog_trace!("dfs: leave {}", self.name_of(idx));
        None
    }
}
