//! Agent manifest loading.
//!
//! A manifest is a TOML file with `[[agent]]` entries (name, metadata and
//! `depends_on` names) and optional `[[skill]]` rules. Loading reads the
//! file and hands plain values to [`AgentGraph`] and
//! [`StaticSkillMatcher`]; neither of those touches the filesystem.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::graph::{AgentGraph, AgentNode};
use crate::orchestration::selector::{SkillRule, StaticSkillMatcher};
use crate::{hlog_debug, hlog_warn, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "agent")]
    pub agents: Vec<AgentNode>,
    #[serde(default, rename = "skill")]
    pub skills: Vec<SkillRule>,
}

impl Manifest {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        hlog_debug!("Manifest::load path={}", path.display());
        let manifest = Self::parse(&fs::read_to_string(path)?)?;
        hlog_debug!(
            "Manifest loaded: {} agents, {} skill rules",
            manifest.agents.len(),
            manifest.skills.len()
        );
        Ok(manifest)
    }

    /// Build the dependency graph. A repeated agent name overwrites the
    /// earlier metadata; edges from both entries are kept.
    pub fn to_graph(&self) -> AgentGraph {
        let mut seen = std::collections::HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.name.as_str()) {
                hlog_warn!("Manifest lists agent {} more than once", agent.name);
            }
        }
        AgentGraph::from_agents(self.agents.iter().cloned())
    }

    pub fn skill_matcher(&self) -> StaticSkillMatcher {
        StaticSkillMatcher::new(self.skills.clone())
    }
}
