//! Role and model tier selection.
//!
//! [`Selector`] scores a task, maps the complexity level to a responsible
//! role and a capability tier, and asks a [`SkillMatcher`] which skills
//! apply. Skill matching sits behind a trait so static rules, a ranking
//! model, or a remote service can back it interchangeably.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::role::{ModelTier, Role};
use crate::core::task::Task;
use crate::error::Result;
use crate::hlog_debug;
use crate::orchestration::complexity::{self, ComplexityLevel, ComplexityResult};

/// Input handed to a [`SkillMatcher`].
#[derive(Debug, Clone)]
pub struct ExecutionContext<'a> {
    pub action: &'a str,
    pub phase: &'a str,
    pub role: Role,
    pub metadata: &'a HashMap<String, serde_json::Value>,
}

/// Source of applicable skill names for an execution context.
pub trait SkillMatcher: Send + Sync {
    fn match_skills(&self, ctx: &ExecutionContext<'_>) -> Vec<String>;
}

/// Matcher that never returns skills.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSkills;

impl SkillMatcher for NoSkills {
    fn match_skills(&self, _ctx: &ExecutionContext<'_>) -> Vec<String> {
        Vec::new()
    }
}

/// A skill that applies when every filter it sets matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRule {
    pub name: String,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Rule-table matcher. Returns matching rule names in table order.
#[derive(Debug, Clone, Default)]
pub struct StaticSkillMatcher {
    rules: Vec<SkillRule>,
}

impl StaticSkillMatcher {
    pub fn new(rules: Vec<SkillRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SkillRule] {
        &self.rules
    }
}

impl SkillMatcher for StaticSkillMatcher {
    fn match_skills(&self, ctx: &ExecutionContext<'_>) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| {
                rule.action.as_deref().map_or(true, |a| a == ctx.action)
                    && rule.phase.as_deref().map_or(true, |p| p == ctx.phase)
                    && rule.role.map_or(true, |r| r == ctx.role)
            })
            .map(|rule| rule.name.clone())
            .collect()
    }
}

/// Outcome of [`Selector::select`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub role: Role,
    pub tier: ModelTier,
    pub skills: Vec<String>,
    pub complexity: ComplexityResult,
    pub reason: String,
}

/// Responsible role for a complexity level. Senior is reached only through
/// `Complex`; developer absorbs the three lowest levels.
pub fn role_for(level: ComplexityLevel) -> Role {
    match level {
        ComplexityLevel::Architectural => Role::Architect,
        ComplexityLevel::Complex => Role::Senior,
        ComplexityLevel::Moderate | ComplexityLevel::Simple | ComplexityLevel::Trivial => {
            Role::Developer
        }
    }
}

pub fn tier_for(role: Role, level: ComplexityLevel) -> ModelTier {
    match role {
        Role::Architect | Role::Reviewer => ModelTier::Opus,
        Role::Senior if level >= ComplexityLevel::Complex => ModelTier::Opus,
        Role::Senior => ModelTier::Sonnet,
        Role::Developer if level >= ComplexityLevel::Moderate => ModelTier::Sonnet,
        Role::Developer => ModelTier::Haiku,
        Role::Product | Role::Ops => ModelTier::Sonnet,
    }
}

pub struct Selector {
    skills: Box<dyn SkillMatcher>,
}

impl Selector {
    pub fn new(skills: Box<dyn SkillMatcher>) -> Self {
        Self { skills }
    }

    /// Pick role, tier and skills for `task`.
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidTask`] before any scoring if the task
    /// fails validation.
    pub fn select(&self, task: &Task) -> Result<Selection> {
        task.validate()?;

        let complexity = complexity::analyze(task);
        let role = role_for(complexity.level);
        let tier = tier_for(role, complexity.level);

        let ctx = ExecutionContext {
            action: &task.action,
            phase: &task.phase,
            role,
            metadata: &task.metadata,
        };
        let skills = self.skills.match_skills(&ctx);

        let reason = format!(
            "{} complexity (score {}) routes to {} on {}",
            complexity.level, complexity.score, role, tier
        );
        hlog_debug!("select: {} [{}]", reason, complexity.reason);

        Ok(Selection {
            role,
            tier,
            skills,
            complexity,
            reason,
        })
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(Box::new(NoSkills))
    }
}

impl std::fmt::Debug for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector").finish_non_exhaustive()
    }
}
