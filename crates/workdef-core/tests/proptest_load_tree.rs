// crates/workdef-core/tests/proptest_load_tree.rs
// ============================================================================
// Module: Load Tree Property-Based Tests
// Description: Property tests for error-tree aggregation invariants.
// Purpose: Detect staleness and ordering bugs across wide tree shapes.
// ============================================================================

//! Property-based tests for load-error tree invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use workdef_core::ItemVersion;
use workdef_core::LoadError;
use workdef_core::LoadErrorTree;

/// Shape description for a randomly generated error tree.
#[derive(Debug, Clone)]
struct TreeSpec {
    locals: usize,
    children: Vec<(String, TreeSpec)>,
}

fn tree_spec_strategy() -> impl Strategy<Value = TreeSpec> {
    let leaf = (0usize .. 3).prop_map(|locals| TreeSpec {
        locals,
        children: Vec::new(),
    });
    leaf.prop_recursive(3, 16, 4, |inner| {
        ((0usize .. 3), prop::collection::vec(("[a-z]{1,6}", inner), 0 .. 3)).prop_map(
            |(locals, children)| TreeSpec { locals, children },
        )
    })
}

fn build_tree(spec: &TreeSpec) -> LoadErrorTree {
    let mut tree = LoadErrorTree::new();
    for index in 0 .. spec.locals {
        tree.add_local(LoadError::supplied(
            format!("field{index}"),
            "provider failed".into(),
        ));
    }
    for (name, child) in &spec.children {
        tree.add_child(name, build_tree(child));
    }
    tree
}

proptest! {
    #[test]
    fn presence_matches_the_flattened_sequence(spec in tree_spec_strategy()) {
        let tree = build_tree(&spec);
        prop_assert_eq!(tree.has_errors(), !tree.collect_all().is_empty());
        prop_assert_eq!(tree.first().is_some(), tree.has_errors());
    }

    #[test]
    fn merge_order_never_changes_presence(
        spec_a in tree_spec_strategy(),
        spec_b in tree_spec_strategy(),
    ) {
        let mut left = LoadErrorTree::new();
        left.add_child("a", build_tree(&spec_a));
        left.add_child("b", build_tree(&spec_b));

        let mut right = LoadErrorTree::new();
        right.add_child("b", build_tree(&spec_b));
        right.add_child("a", build_tree(&spec_a));

        prop_assert_eq!(left.has_errors(), right.has_errors());
        prop_assert_eq!(left.collect_all().len(), right.collect_all().len());
    }

    #[test]
    fn paths_compose_through_merges(
        segments in prop::collection::vec("[a-z]{1,8}", 1 .. 5),
    ) {
        let mut tree = LoadErrorTree::new();
        tree.add_local(LoadError::required("leaf"));
        for segment in segments.iter().rev() {
            let mut parent = LoadErrorTree::new();
            parent.add_child(segment, tree);
            tree = parent;
        }

        let expected = format!("{}.leaf", segments.join("."));
        prop_assert_eq!(tree.first().unwrap().path(), expected.as_str());
        prop_assert!(tree.find(&expected).is_some());
    }

    #[test]
    fn version_identifiers_round_trip(number in 0u64 ..= u64::MAX) {
        let version = ItemVersion::SpecificVersion(number);
        let parsed = ItemVersion::parse_identifier(&version.identifier()).unwrap();
        prop_assert_eq!(parsed, version);
    }

    #[test]
    fn negative_version_numbers_name_the_offender(number in i64::MIN .. 0i64) {
        let error = ItemVersion::specific(number).unwrap_err();
        prop_assert!(error.to_string().contains(&number.to_string()));
    }
}
