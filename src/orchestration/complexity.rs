//! Task complexity scoring.
//!
//! Score = type weight + keyword weight + file-count weight. The function
//! is pure and deterministic, and never decreases as keywords or files are
//! added.

use serde::{Deserialize, Serialize};

use crate::core::task::{Task, TaskType};

/// Weight used for a category name that does not parse.
pub const DEFAULT_TYPE_WEIGHT: u32 = 15;

/// Keyword weights, matched case-sensitively as substrings.
pub const KEYWORD_WEIGHTS: &[(&str, u32)] = &[
    ("architecture", 15),
    ("design", 15),
    ("migrate", 12),
    ("integrate", 10),
    ("refactor", 10),
    ("implement", 8),
    ("add", 5),
    ("create", 5),
    ("fix", 3),
    ("update", 3),
];

/// Ordinal complexity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    Trivial,
    Simple,
    Moderate,
    Complex,
    Architectural,
}

impl ComplexityLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            50.. => ComplexityLevel::Architectural,
            35.. => ComplexityLevel::Complex,
            20.. => ComplexityLevel::Moderate,
            10.. => ComplexityLevel::Simple,
            _ => ComplexityLevel::Trivial,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Trivial => "trivial",
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Moderate => "moderate",
            ComplexityLevel::Complex => "complex",
            ComplexityLevel::Architectural => "architectural",
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityResult {
    pub level: ComplexityLevel,
    pub score: u32,
    /// Breakdown of how the score was reached.
    pub reason: String,
}

pub fn type_weight(task_type: TaskType) -> u32 {
    match task_type {
        TaskType::Architecture => 40,
        TaskType::Feature => 25,
        TaskType::Refactor => 20,
        TaskType::BugFix => 15,
        TaskType::Test => 10,
        TaskType::Documentation => 5,
    }
}

/// Type weight for a raw category name; unrecognized names weigh
/// [`DEFAULT_TYPE_WEIGHT`].
pub fn type_weight_for_name(name: &str) -> u32 {
    name.parse::<TaskType>()
        .map(type_weight)
        .unwrap_or(DEFAULT_TYPE_WEIGHT)
}

/// Every dictionary term found in `description`, with its weight.
/// Overlapping terms each count in full.
pub fn keyword_matches(description: &str) -> Vec<(&'static str, u32)> {
    KEYWORD_WEIGHTS
        .iter()
        .filter(|(term, _)| description.contains(*term))
        .copied()
        .collect()
}

pub fn file_weight(count: usize) -> u32 {
    match count {
        0 => 0,
        1 => 2,
        2..=3 => 5,
        4..=5 => 10,
        _ => 15,
    }
}

pub fn analyze(task: &Task) -> ComplexityResult {
    score_parts(
        task.task_type.as_str(),
        type_weight(task.task_type),
        &task.description,
        task.files.len(),
    )
}

/// Score a task given as raw values. Unrecognized category names weigh
/// [`DEFAULT_TYPE_WEIGHT`]; this is the path the CLI takes, so a category
/// outside the closed set can still be scored.
pub fn analyze_named(task_type: &str, description: &str, file_count: usize) -> ComplexityResult {
    score_parts(
        task_type,
        type_weight_for_name(task_type),
        description,
        file_count,
    )
}

fn score_parts(label: &str, type_score: u32, description: &str, file_count: usize) -> ComplexityResult {
    let matches = keyword_matches(description);
    let keyword_score: u32 = matches.iter().map(|(_, w)| w).sum();
    let file_score = file_weight(file_count);

    let score = type_score + keyword_score + file_score;
    let level = ComplexityLevel::from_score(score);

    let terms: Vec<&str> = matches.iter().map(|(t, _)| *t).collect();
    let reason = format!(
        "type {} +{}, keywords [{}] +{}, {} files +{}",
        label,
        type_score,
        terms.join(", "),
        keyword_score,
        file_count,
        file_score
    );

    ComplexityResult {
        level,
        score,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("src/f{}.rs", i)).collect()
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(ComplexityLevel::from_score(0), ComplexityLevel::Trivial);
        assert_eq!(ComplexityLevel::from_score(9), ComplexityLevel::Trivial);
        assert_eq!(ComplexityLevel::from_score(10), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(19), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(20), ComplexityLevel::Moderate);
        assert_eq!(ComplexityLevel::from_score(35), ComplexityLevel::Complex);
        assert_eq!(ComplexityLevel::from_score(49), ComplexityLevel::Complex);
        assert_eq!(ComplexityLevel::from_score(50), ComplexityLevel::Architectural);
    }

    #[test]
    fn test_level_ordering() {
        assert!(ComplexityLevel::Trivial < ComplexityLevel::Simple);
        assert!(ComplexityLevel::Moderate < ComplexityLevel::Complex);
        assert!(ComplexityLevel::Complex < ComplexityLevel::Architectural);
    }

    #[test]
    fn test_file_weight_buckets() {
        assert_eq!(file_weight(0), 0);
        assert_eq!(file_weight(1), 2);
        assert_eq!(file_weight(3), 5);
        assert_eq!(file_weight(4), 10);
        assert_eq!(file_weight(5), 10);
        assert_eq!(file_weight(6), 15);
        assert_eq!(file_weight(60), 15);
    }

    #[test]
    fn test_type_weight_for_unknown_name() {
        assert_eq!(type_weight_for_name("architecture"), 40);
        assert_eq!(type_weight_for_name("chore"), DEFAULT_TYPE_WEIGHT);
        assert_eq!(type_weight_for_name(""), DEFAULT_TYPE_WEIGHT);
    }

    #[test]
    fn test_analyze_named_unknown_category() {
        let result = analyze_named("chore", "update deps", 1);
        // 15 default + update 3 + 1 file 2
        assert_eq!(result.score, 20);
        assert_eq!(result.level, ComplexityLevel::Moderate);
        assert!(result.reason.starts_with("type chore +15"));
    }

    #[test]
    fn test_analyze_named_matches_analyze_for_known_category() {
        let task = Task::new(TaskType::Feature, "implement export").with_files(files(2));
        assert_eq!(analyze_named("feature", "implement export", 2), analyze(&task));
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(keyword_matches("Fix the build").is_empty());
        assert_eq!(keyword_matches("fix the build"), vec![("fix", 3)]);
    }

    #[test]
    fn test_overlapping_keywords_each_count() {
        // "address" contains "add"; "refactored" contains "refactor".
        let matches = keyword_matches("address the refactored module");
        assert_eq!(matches, vec![("refactor", 10), ("add", 5)]);
    }

    #[test]
    fn test_bug_fix_typo_is_moderate() {
        let task = Task::new(TaskType::BugFix, "fix typo in comment").with_files(files(1));
        let result = analyze(&task);
        assert_eq!(result.score, 20);
        assert_eq!(result.level, ComplexityLevel::Moderate);
        assert!(result.reason.contains("fix"));
    }

    #[test]
    fn test_architecture_task_is_architectural() {
        let task = Task::new(TaskType::Architecture, "design and implement new architecture")
            .with_files(files(6));
        let result = analyze(&task);
        // 40 type + design 15 + implement 8 + architecture 15 + 15 files
        assert_eq!(result.score, 93);
        assert_eq!(result.level, ComplexityLevel::Architectural);
    }

    #[test]
    fn test_documentation_without_signals_is_trivial() {
        let task = Task::new(TaskType::Documentation, "tidy readme");
        let result = analyze(&task);
        assert_eq!(result.score, 5);
        assert_eq!(result.level, ComplexityLevel::Trivial);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let task = Task::new(TaskType::Feature, "add export and update docs").with_files(files(2));
        assert_eq!(analyze(&task), analyze(&task));
    }

    #[test]
    fn test_score_monotonic_in_files_and_keywords() {
        let mut previous = 0;
        for n in 0..10 {
            let task = Task::new(TaskType::Test, "cover parser").with_files(files(n));
            let score = analyze(&task).score;
            assert!(score >= previous);
            previous = score;
        }

        let base = analyze(&Task::new(TaskType::Refactor, "tidy parser")).score;
        let more = analyze(&Task::new(TaskType::Refactor, "tidy parser, migrate config")).score;
        assert!(more > base);
    }
}
