//! Integration test suite for handoff.
//!
//! These tests drive the public API the way the CLI does: load a manifest,
//! build the agent graph, and route tasks through selection and delegation.
//!
//! # Test Categories
//!
//! - `graph_queries`: Closure, ordering and validation over loaded manifests
//! - `task_routing`: Selection and delegation for end-to-end task flows

mod fixtures;

mod graph_queries;
mod task_routing;
