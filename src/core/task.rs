//! Task data model.
//!
//! A task is an ephemeral description of work to route: a category, a
//! free-text description, an external action/phase pair, the files it
//! touches, and free-form metadata. Tasks are built per request and never
//! stored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Why a task was rejected before routing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("task description is required")]
    MissingDescription,

    #[error("task type is required")]
    MissingType,

    #[error("unknown task type: {0}")]
    UnknownType(String),
}

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Feature,
    BugFix,
    Refactor,
    Test,
    Documentation,
    Architecture,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::Feature,
        TaskType::BugFix,
        TaskType::Refactor,
        TaskType::Test,
        TaskType::Documentation,
        TaskType::Architecture,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Feature => "feature",
            TaskType::BugFix => "bug_fix",
            TaskType::Refactor => "refactor",
            TaskType::Test => "test",
            TaskType::Documentation => "documentation",
            TaskType::Architecture => "architecture",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskType {
    type Err = TaskError;

    /// Accepts the snake_case names plus the common `bugfix`/`bug-fix`
    /// and `docs` spellings.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(TaskError::MissingType),
            "feature" => Ok(TaskType::Feature),
            "bug_fix" | "bugfix" | "bug-fix" => Ok(TaskType::BugFix),
            "refactor" => Ok(TaskType::Refactor),
            "test" => Ok(TaskType::Test),
            "documentation" | "docs" => Ok(TaskType::Documentation),
            "architecture" => Ok(TaskType::Architecture),
            other => Err(TaskError::UnknownType(other.to_string())),
        }
    }
}

/// A unit of work to classify and route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// What should be done. Must be non-blank.
    pub description: String,
    /// Task category.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// External action name, passed through to skill matching.
    #[serde(default)]
    pub action: String,
    /// External workflow phase, passed through to skill matching.
    #[serde(default)]
    pub phase: String,
    /// Files the task is expected to touch.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Free-form caller metadata.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Task {
    pub fn new(task_type: TaskType, description: &str) -> Self {
        Self {
            description: description.to_string(),
            task_type,
            action: String::new(),
            phase: String::new(),
            files: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    /// Build a task from raw strings, rejecting a blank or unknown type.
    pub fn parse(task_type: &str, description: &str) -> std::result::Result<Self, TaskError> {
        let task = Self::new(task_type.parse()?, description);
        task.validate()?;
        Ok(task)
    }

    pub fn with_action(mut self, action: &str, phase: &str) -> Self {
        self.action = action.to_string();
        self.phase = phase.to_string();
        self
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metadata(mut self, key: &str, value: serde_json::Value) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Check the task is routable. The type is guaranteed by construction,
    /// so only the description can be missing here.
    pub fn validate(&self) -> std::result::Result<(), TaskError> {
        if self.description.trim().is_empty() {
            return Err(TaskError::MissingDescription);
        }
        Ok(())
    }
}
