//! Agent roles and capability tiers.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A responsible role in the delivery workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Shapes requirements; hands work to the engineering roles.
    Product,
    /// Owns system design for architectural work.
    Architect,
    /// Handles complex implementation and triage.
    Senior,
    /// Default implementer for everyday work.
    Developer,
    /// Terminal review step. Hands off to no one.
    Reviewer,
    /// Operations and deployment.
    Ops,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Product,
        Role::Architect,
        Role::Senior,
        Role::Developer,
        Role::Reviewer,
        Role::Ops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Product => "product",
            Role::Architect => "architect",
            Role::Senior => "senior",
            Role::Developer => "developer",
            Role::Reviewer => "reviewer",
            Role::Ops => "ops",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "product" => Ok(Role::Product),
            "architect" => Ok(Role::Architect),
            "senior" => Ok(Role::Senior),
            "developer" => Ok(Role::Developer),
            "reviewer" => Ok(Role::Reviewer),
            "ops" => Ok(Role::Ops),
            other => Err(Error::UnknownRole(other.to_string())),
        }
    }
}

/// Capability tier tag, heaviest first.
///
/// A tier is not a concrete model identifier; [`crate::config::Config`]
/// maps tags to model ids when one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Haiku,
    Sonnet,
    Opus,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Haiku => "haiku",
            ModelTier::Sonnet => "sonnet",
            ModelTier::Opus => "opus",
        }
    }
}

impl std::fmt::Display for ModelTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelTier {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "opus" => Ok(ModelTier::Opus),
            "sonnet" => Ok(ModelTier::Sonnet),
            "haiku" => Ok(ModelTier::Haiku),
            other => Err(Error::UnknownTier(other.to_string())),
        }
    }
}
