//! Test fixtures for integration tests.
//!
//! Provides helpers for:
//! - Writing agent manifests to a temporary directory
//! - A predefined delivery-team manifest
//! - Building tasks with a given number of touched files

use std::path::PathBuf;
use tempfile::TempDir;

use handoff::core::{Task, TaskType};
use handoff::manifest::Manifest;

/// Manifest for a full delivery team. Each agent depends on the agents it
/// delegates to.
pub const TEAM_MANIFEST: &str = r#"
[[agent]]
name = "product"
description = "Shapes requirements"
depends_on = ["architect"]

[[agent]]
name = "architect"
model = "opus"
depends_on = ["senior", "developer"]

[[agent]]
name = "senior"
depends_on = ["developer", "reviewer"]

[[agent]]
name = "developer"
depends_on = ["reviewer"]

[[agent]]
name = "reviewer"

[[agent]]
name = "ops"
depends_on = ["senior", "developer"]

[[skill]]
name = "code-review"
role = "reviewer"

[[skill]]
name = "tdd"
action = "implement"
role = "developer"

[[skill]]
name = "system-design"
phase = "design"
"#;

/// A manifest written to a temporary directory.
pub struct ManifestFile {
    /// Keeps the directory alive for the duration of the test.
    pub temp_dir: TempDir,
    /// Path to the written manifest.
    pub path: PathBuf,
}

impl ManifestFile {
    pub fn new(contents: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("agents.toml");
        std::fs::write(&path, contents).expect("Failed to write manifest");
        Self { temp_dir, path }
    }

    pub fn load(&self) -> Manifest {
        Manifest::load(&self.path).expect("Failed to load manifest")
    }
}

/// A task touching `file_count` distinct files.
pub fn task_with_files(task_type: TaskType, description: &str, file_count: usize) -> Task {
    Task::new(task_type, description)
        .with_files((0..file_count).map(|i| format!("src/module_{}.rs", i)))
}

/// Index of `name` in `order`, panicking if absent.
pub fn position(order: &[String], name: &str) -> usize {
    order
        .iter()
        .position(|n| n == name)
        .unwrap_or_else(|| panic!("{} missing from {:?}", name, order))
}
