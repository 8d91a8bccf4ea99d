//! Core domain models for handoff.
//!
//! Tasks, roles, and the agent dependency graph together with its
//! resolver and validator.

pub mod graph;
pub mod resolver;
pub mod role;
pub mod task;
pub mod validator;

pub use graph::{AgentGraph, AgentMetadata, AgentNode};
pub use role::{ModelTier, Role};
pub use task::{Task, TaskError, TaskType};
pub use validator::{MissingReference, ValidationReport};
