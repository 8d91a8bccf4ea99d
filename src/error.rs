use thiserror::Error;

use crate::core::role::Role;
use crate::core::task::TaskError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Invalid task: {0}")]
    InvalidTask(#[from] TaskError),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown model tier: {0}")]
    UnknownTier(String),

    #[error("Agent not found: {name}")]
    AgentNotFound { name: String },

    #[error("Agent {agent} depends on unknown agent {dependency}")]
    MissingDependency { agent: String, dependency: String },

    #[error("Dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    #[error("Dependency cycle detected: cannot order agents [{}]", .remaining.join(", "))]
    UnorderableGraph { remaining: Vec<String> },

    #[error("No next agent after {role}")]
    NoNextAgent { role: Role },

    #[error("Hand-off from {from} to {to} not allowed: {reason}")]
    HandOffDenied { from: Role, to: Role, reason: String },
}

/// Broad classification of an [`Error`].
///
/// `WorkflowEnd` is a normal end-of-chain signal; callers usually treat it
/// as "task complete" rather than as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The task or a role name was rejected before any lookup.
    Validation,
    /// The agent graph is broken (missing reference or cycle).
    Structural,
    /// The delegation chain has no further role.
    WorkflowEnd,
    /// Files, parsing or the host environment.
    Environment,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTask(_)
            | Error::UnknownRole(_)
            | Error::UnknownTier(_)
            | Error::HandOffDenied { .. } => ErrorKind::Validation,
            Error::AgentNotFound { .. }
            | Error::MissingDependency { .. }
            | Error::CycleDetected { .. }
            | Error::UnorderableGraph { .. } => ErrorKind::Structural,
            Error::NoNextAgent { .. } => ErrorKind::WorkflowEnd,
            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::NoHomeDir => ErrorKind::Environment,
        }
    }

    /// True for both the validator's cycle witness and the ordering failure.
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            Error::CycleDetected { .. } | Error::UnorderableGraph { .. }
        )
    }

    pub fn is_workflow_end(&self) -> bool {
        self.kind() == ErrorKind::WorkflowEnd
    }
}

pub type Result<T> = std::result::Result<T, Error>;
