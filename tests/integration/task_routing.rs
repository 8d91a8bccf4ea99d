//! End-to-end routing: score, select, then walk the delegation chain.

use handoff::core::{ModelTier, Role, Task, TaskError, TaskType};
use handoff::orchestration::{ComplexityLevel, DelegationEngine, Selector};
use handoff::{Error, ErrorKind};

use super::fixtures::{task_with_files, ManifestFile, TEAM_MANIFEST};

fn team_selector() -> Selector {
    let matcher = ManifestFile::new(TEAM_MANIFEST).load().skill_matcher();
    Selector::new(Box::new(matcher))
}

#[test]
fn test_small_bug_fix_goes_to_developer() {
    let task = task_with_files(TaskType::BugFix, "fix typo in comment", 1);
    let selection = team_selector().select(&task).unwrap();

    assert_eq!(selection.complexity.score, 20);
    assert_eq!(selection.complexity.level, ComplexityLevel::Moderate);
    assert_eq!(selection.role, Role::Developer);
    assert_eq!(selection.tier, ModelTier::Sonnet);
}

#[test]
fn test_architecture_task_goes_to_architect() {
    let task = task_with_files(
        TaskType::Architecture,
        "design and implement new architecture",
        6,
    )
    .with_action("plan", "design");
    let selection = team_selector().select(&task).unwrap();

    assert_eq!(selection.complexity.level, ComplexityLevel::Architectural);
    assert_eq!(selection.role, Role::Architect);
    assert_eq!(selection.tier, ModelTier::Opus);
    assert_eq!(selection.skills, vec!["system-design"]);
}

#[test]
fn test_complex_refactor_goes_to_senior_on_heaviest_tier() {
    // 20 type + refactor 10 + 5 files 10 = 40
    let task = task_with_files(TaskType::Refactor, "refactor storage layer", 5);
    let selection = team_selector().select(&task).unwrap();

    assert_eq!(selection.complexity.level, ComplexityLevel::Complex);
    assert_eq!(selection.role, Role::Senior);
    assert_eq!(selection.tier, ModelTier::Opus);
}

#[test]
fn test_developer_skills_follow_action() {
    let task = Task::new(TaskType::Test, "cover parser").with_action("implement", "build");
    let selection = team_selector().select(&task).unwrap();

    assert_eq!(selection.role, Role::Developer);
    assert_eq!(selection.tier, ModelTier::Haiku);
    assert_eq!(selection.skills, vec!["tdd"]);
}

#[test]
fn test_walk_feature_chain_to_completion() {
    let engine = DelegationEngine::new();
    let task = Task::new(TaskType::Feature, "add export button");

    let mut current = engine.delegation_chain(&task).unwrap()[0];
    let mut visited = vec![current];
    loop {
        assert!(engine.should_delegate(&task, current).unwrap());
        match engine.next_agent(&task, current) {
            Ok(next) => {
                assert!(engine.can_hand_off(current, next));
                engine.authorize_hand_off(&task, current, next).unwrap();
                visited.push(next);
                current = next;
            }
            Err(e) => {
                assert_eq!(e.kind(), ErrorKind::WorkflowEnd);
                break;
            }
        }
    }

    assert_eq!(
        visited,
        vec![Role::Architect, Role::Senior, Role::Developer, Role::Reviewer]
    );
}

#[test]
fn test_bug_fix_chain_end() {
    let engine = DelegationEngine::new();
    let task = Task::new(TaskType::BugFix, "fix crash on save");

    assert_eq!(
        engine.delegation_chain(&task).unwrap(),
        &[Role::Senior, Role::Developer, Role::Reviewer]
    );
    assert!(matches!(
        engine.next_agent(&task, Role::Reviewer),
        Err(Error::NoNextAgent { .. })
    ));
    for to in Role::ALL {
        assert!(!engine.can_hand_off(Role::Reviewer, to));
    }
}

#[test]
fn test_invalid_task_is_rejected_everywhere() {
    let engine = DelegationEngine::new();
    let task = Task::new(TaskType::Feature, "   ");

    let select = team_selector().select(&task).unwrap_err();
    assert_eq!(select.kind(), ErrorKind::Validation);
    assert!(matches!(
        engine.next_agent(&task, Role::Architect),
        Err(Error::InvalidTask(TaskError::MissingDescription))
    ));
    assert!(engine.should_delegate(&task, Role::Architect).is_err());
}

#[test]
fn test_raw_inputs_are_parsed_before_routing() {
    assert!(matches!(
        Task::parse("", "something"),
        Err(TaskError::MissingType)
    ));
    assert!(matches!(
        Task::parse("chore", "something"),
        Err(TaskError::UnknownType(_))
    ));
    assert!("intern".parse::<Role>().is_err());
    assert_eq!(DelegationEngine::new().chain_for_name("chore"), &[Role::Developer]);
}
