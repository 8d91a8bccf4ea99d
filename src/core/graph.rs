//! Agent dependency graph.
//!
//! Nodes are agents, and an edge `from -> to` records that `from` requires
//! `to`. The graph is built once from external metadata and then queried
//! read-only by the resolver and validator.

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque per-agent metadata supplied by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Model hint from the manifest; informational only.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Declared dependency names, in manifest order.
    #[serde(default, rename = "depends_on")]
    pub dependencies: Vec<String>,
}

/// A named agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentNode {
    pub name: String,
    #[serde(flatten)]
    pub metadata: AgentMetadata,
}

impl AgentNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            metadata: AgentMetadata::default(),
        }
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// A vertex is either a known agent or a name that has only been seen as
/// an edge endpoint.
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub(crate) name: String,
    pub(crate) agent: Option<AgentNode>,
}

/// The agent dependency graph.
///
/// Edges have set semantics: inserting the same `(from, to)` pair twice
/// records one edge. Edge insertion never checks that either endpoint
/// exists as an agent; dangling names are reported by the validator.
pub struct AgentGraph {
    pub(crate) graph: DiGraph<Vertex, ()>,
    index: HashMap<String, NodeIndex>,
}

impl AgentGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from loader output: every node first, then one edge
    /// per declared dependency.
    pub fn from_agents<I>(agents: I) -> Self
    where
        I: IntoIterator<Item = AgentNode>,
    {
        let agents: Vec<AgentNode> = agents.into_iter().collect();
        let mut graph = Self::new();
        for agent in &agents {
            graph.add_agent(agent.clone());
        }
        for agent in &agents {
            for dep in &agent.metadata.dependencies {
                graph.add_dependency(&agent.name, dep);
            }
        }
        graph
    }

    fn vertex(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(Vertex {
            name: name.to_string(),
            agent: None,
        });
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Insert or replace an agent. Replacing keeps every edge already
    /// recorded for the name.
    pub fn add_agent(&mut self, agent: AgentNode) -> NodeIndex {
        let idx = self.vertex(&agent.name);
        self.graph[idx].agent = Some(agent);
        idx
    }

    /// Record that `from` requires `to`.
    pub fn add_dependency(&mut self, from: &str, to: &str) {
        let from_idx = self.vertex(from);
        let to_idx = self.vertex(to);
        self.graph.update_edge(from_idx, to_idx, ());
    }

    /// Direct dependencies of `name` in insertion order. Unknown names
    /// yield an empty list.
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        match self.index.get(name) {
            Some(&idx) => self.successors(idx).map(|n| self.name_of(n)).collect(),
            None => Vec::new(),
        }
    }

    /// Agents that list `name` as a direct dependency.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        let mut names: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .collect();
        names.sort();
        names.into_iter().map(|n| self.name_of(n)).collect()
    }

    pub fn get(&self, name: &str) -> Option<&AgentNode> {
        self.index
            .get(name)
            .and_then(|&idx| self.graph[idx].agent.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Known agents in insertion order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentNode> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph[idx].agent.as_ref())
    }

    pub fn agent_count(&self) -> usize {
        self.agents().count()
    }

    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.agent_count() == 0
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub(crate) fn name_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    pub(crate) fn is_agent(&self, idx: NodeIndex) -> bool {
        self.graph[idx].agent.is_some()
    }

    pub(crate) fn agent_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices().filter(move |&idx| self.is_agent(idx))
    }

    /// Outgoing neighbours in edge insertion order. petgraph walks its
    /// adjacency list newest first.
    pub(crate) fn successors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> {
        let mut out: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        out.reverse();
        out.into_iter()
    }
}

impl Default for AgentGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AgentGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentGraph")
            .field("agents", &self.agent_count())
            .field("dependencies", &self.dependency_count())
            .finish()
    }
}
