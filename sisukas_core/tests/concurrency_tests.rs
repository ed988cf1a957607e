//! Sharing registries and rules across threads

mod helpers;

use std::sync::Arc;
use std::thread;

use helpers::{catalog, codes, memberships, registry};
use sisukas_core::{
    BlueprintRegistry, Course, FilterConfig, FilterRuleGroups, MembershipSets, Rule,
    apply_filters, build_rule_groups,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_send_and_sync() {
    assert_send_sync::<BlueprintRegistry<Course>>();
    assert_send_sync::<Rule<Course>>();
    assert_send_sync::<FilterRuleGroups<Course>>();
    assert_send_sync::<MembershipSets>();
}

#[test]
fn test_rule_groups_shared_between_threads() {
    let registry = registry(memberships());
    let courses = catalog();
    let configs = vec![FilterConfig::new(1, "level", "equals").with_value("basic-studies")];
    let groups = build_rule_groups(&configs, &registry).unwrap();

    let results: Vec<Vec<String>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| codes(&apply_filters(&groups, &courses))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for kept in results {
        assert_eq!(kept, vec!["CS-A1110", "CS-A1120", "MS-A0111"]);
    }
}

#[test]
fn test_membership_updates_while_filtering() {
    let sets = memberships();
    let registry = registry(Arc::clone(&sets));
    let courses = catalog();
    let configs = vec![FilterConfig::new(1, "minor", "isMemberOf").with_value("MAT")];
    let groups = build_rule_groups(&configs, &registry).unwrap();

    thread::scope(|scope| {
        let writer = scope.spawn(|| {
            for course in ["CS-A1110", "CS-A1120"] {
                sets.add_value("minor", "MAT", course);
            }
        });
        // Readers see either the old or the new set, never a torn one
        let reader = scope.spawn(|| apply_filters(&groups, &courses).len());
        writer.join().unwrap();
        let seen = reader.join().unwrap();
        assert!((1..=3).contains(&seen));
    });

    assert_eq!(
        codes(&apply_filters(&groups, &courses)),
        vec!["CS-A1110", "CS-A1120", "MS-A0111"]
    );
}
