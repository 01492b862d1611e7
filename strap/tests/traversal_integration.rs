//! Integration tests for address validation and traversal order.
//!
//! These tests build real directory trees and check that validation and
//! traversal agree on which directories an address reaches.

mod common;

use common::{RecordingAction, TreeFixture};
use strap::workspace::WorkspaceTree;
use strap::{Error, Role, StructureValidator, Traversal, WorkspacePath};

fn address(raw: &str) -> WorkspacePath {
    WorkspacePath::parse(raw).unwrap()
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_flat_root_accepts_only_empty_address() {
    let tree = TreeFixture::new().file("Brewfile", "").build();
    let validator = StructureValidator::new(tree.path());

    assert!(validator.validate(&WorkspacePath::root()).is_ok());
    assert!(matches!(
        validator.validate(&address("work")),
        Err(Error::UnexpectedWorkspaceArgument { .. })
    ));
}

#[test]
fn test_container_root_requires_address() {
    let tree = TreeFixture::new().dir("workspaces/work").build();
    let validator = StructureValidator::new(tree.path());

    assert!(matches!(
        validator.validate(&WorkspacePath::root()),
        Err(Error::MissingWorkspaceArgument { .. })
    ));
}

#[test]
fn test_unknown_workspace_names_candidate() {
    let tree = TreeFixture::org_project().build();
    let validator = StructureValidator::new(tree.path());

    match validator.validate(&address("org.nope")) {
        Err(Error::UnknownWorkspace { path, address }) => {
            assert!(path.ends_with("workspaces/org/workspaces/nope"));
            assert_eq!(address, "org.nope");
        }
        other => panic!("expected UnknownWorkspace, got {other:?}"),
    }
}

#[test]
fn test_container_cannot_be_bootstrapped() {
    let tree = TreeFixture::org_project().build();
    let validator = StructureValidator::new(tree.path());

    assert!(matches!(
        validator.validate(&address("org")),
        Err(Error::CannotBootstrapContainer { .. })
    ));
}

#[test]
fn test_every_listed_leaf_validates() {
    let tree = TreeFixture::org_project()
        .dir("workspaces/org/workspaces/shared")
        .dir("workspaces/personal")
        .build();
    let validator = StructureValidator::new(tree.path());

    let listing = WorkspaceTree::read(tree.path()).unwrap();
    let leaves = listing.leaves();
    assert_eq!(leaves.len(), 4);
    for entry in leaves {
        validator.validate(&address(&entry.address)).unwrap();
    }
}

// ============================================================================
// Traversal
// ============================================================================

#[test]
fn test_nested_traversal_visits_each_shared_level() {
    let tree = TreeFixture::org_project()
        .dir("workspaces/org/workspaces/shared")
        .build();
    let mut action = RecordingAction::new();

    Traversal::new(tree.path())
        .run(&address("org.project"), &mut action)
        .unwrap();

    assert_eq!(
        action.relative_paths(tree.path()),
        [
            "workspaces/shared",
            "workspaces/org/workspaces/shared",
            "workspaces/org/workspaces/project",
        ]
    );
    let depths: Vec<usize> = action.visited.iter().map(|s| s.depth).collect();
    assert_eq!(depths, [0, 1, 2]);
}

#[test]
fn test_flat_root_visits_root_once() {
    let tree = TreeFixture::new().file("Brewfile", "").build();
    let mut action = RecordingAction::new();

    let steps = Traversal::new(tree.path())
        .run(&WorkspacePath::root(), &mut action)
        .unwrap();

    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].path, tree.path());
    assert_eq!(steps[0].role, Role::Root);
}

#[test]
fn test_addressing_shared_visits_it_once() {
    let tree = TreeFixture::org_project().build();
    let steps = Traversal::new(tree.path())
        .plan(&address("shared"))
        .unwrap();

    assert_eq!(steps.len(), 1);
    assert!(steps[0].path.ends_with("workspaces/shared"));
    assert_eq!(steps[0].role, Role::Named);
}

#[test]
fn test_failure_stops_traversal_and_names_directory() {
    let tree = TreeFixture::org_project().build();
    let shared = tree.path().join("workspaces/shared");
    let mut action = RecordingAction::failing_at(&shared);

    let err = Traversal::new(tree.path())
        .run(&address("org.project"), &mut action)
        .unwrap_err();

    assert!(action.visited.is_empty());
    match err {
        Error::ActionFailure { action, path, .. } => {
            assert_eq!(action, "record");
            assert_eq!(path, shared);
        }
        other => panic!("expected ActionFailure, got {other:?}"),
    }
}

#[test]
fn test_plan_matches_run() {
    let tree = TreeFixture::org_project().build();
    let traversal = Traversal::new(tree.path());
    let mut action = RecordingAction::new();

    let planned = traversal.plan(&address("org.project")).unwrap();
    let ran = traversal.run(&address("org.project"), &mut action).unwrap();

    assert_eq!(planned, ran);
    assert_eq!(planned, action.visited);
}
