//! Graph queries over loaded manifests.

use handoff::core::AgentGraph;
use handoff::{Error, ErrorKind};

use super::fixtures::{position, ManifestFile, TEAM_MANIFEST};

fn team_graph() -> AgentGraph {
    ManifestFile::new(TEAM_MANIFEST).load().to_graph()
}

#[test]
fn test_team_manifest_is_valid() {
    let graph = team_graph();
    assert_eq!(graph.agent_count(), 6);
    assert!(graph.validate().is_ok());
}

#[test]
fn test_full_ordering_respects_every_edge() {
    let graph = team_graph();
    let order = graph.full_ordering().unwrap();

    assert_eq!(order.len(), graph.agent_count());
    let mut unique = order.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), order.len());

    for agent in graph.agents() {
        for dep in graph.dependencies(&agent.name) {
            assert!(
                position(&order, &agent.name) < position(&order, dep),
                "{} should precede {} in {:?}",
                agent.name,
                dep,
                order
            );
        }
    }
}

#[test]
fn test_load_order_puts_dependencies_first() {
    let graph = team_graph();
    let order = graph.load_order().unwrap();
    assert_eq!(order.first().map(String::as_str), Some("reviewer"));
    assert!(position(&order, "developer") < position(&order, "architect"));
}

#[test]
fn test_resolve_architect_closure() {
    let graph = team_graph();
    let closure = graph.resolve_dependencies(&["architect"]).unwrap();

    assert_eq!(closure, vec!["architect", "senior", "developer", "reviewer"]);
    assert!(!closure.contains(&"product".to_string()));
    assert!(!closure.contains(&"ops".to_string()));
}

#[test]
fn test_resolve_multiple_seeds() {
    let graph = team_graph();
    let closure = graph.resolve_dependencies(&["ops", "developer"]).unwrap();

    assert_eq!(closure.len(), 4);
    assert!(position(&closure, "ops") < position(&closure, "senior"));
    assert!(position(&closure, "senior") < position(&closure, "developer"));
}

#[test]
fn test_resolve_unknown_agent() {
    let err = team_graph().resolve_dependencies(&["qa"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("qa"));
}

#[test]
fn test_broken_reference_fails_validation_and_closure() {
    let manifest = ManifestFile::new(
        r#"
        [[agent]]
        name = "lead"
        depends_on = ["worker"]

        [[agent]]
        name = "worker"
        depends_on = ["contractor"]
        "#,
    );
    let graph = manifest.load().to_graph();

    assert!(matches!(
        graph.validate(),
        Err(Error::MissingDependency { ref agent, ref dependency })
            if agent == "worker" && dependency == "contractor"
    ));
    assert!(matches!(
        graph.resolve_dependencies(&["lead"]),
        Err(Error::AgentNotFound { ref name }) if name == "contractor"
    ));
    // Ordering ignores dangling names.
    assert_eq!(graph.full_ordering().unwrap(), vec!["lead", "worker"]);
}

#[test]
fn test_cycle_fails_validation_and_ordering() {
    let manifest = ManifestFile::new(
        r#"
        [[agent]]
        name = "a"
        depends_on = ["b"]

        [[agent]]
        name = "b"
        depends_on = ["c"]

        [[agent]]
        name = "c"
        depends_on = ["a"]
        "#,
    );
    let graph = manifest.load().to_graph();

    let err = graph.validate().unwrap_err();
    let msg = err.to_string();
    assert!(msg.to_lowercase().contains("cycle"));
    for name in ["a", "b", "c"] {
        assert!(msg.contains(name));
    }

    let err = graph.full_ordering().unwrap_err();
    assert!(err.is_cycle());
    assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let manifest = ManifestFile::new(
        r#"
        [[agent]]
        name = "solo"
        depends_on = ["solo"]
        "#,
    );
    let graph = manifest.load().to_graph();

    assert!(graph.validate().unwrap_err().is_cycle());
    assert!(graph.full_ordering().unwrap_err().is_cycle());
}

#[test]
fn test_repeated_dependency_does_not_create_cycle() {
    let manifest = ManifestFile::new(
        r#"
        [[agent]]
        name = "a"
        depends_on = ["b", "b"]

        [[agent]]
        name = "b"
        "#,
    );
    let graph = manifest.load().to_graph();

    assert_eq!(graph.dependency_count(), 1);
    assert_eq!(graph.full_ordering().unwrap(), vec!["a", "b"]);
}
