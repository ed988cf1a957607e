//! End-to-end filtering of a small course catalog

mod helpers;

use assert_matches::assert_matches;
use helpers::{catalog, codes, date, memberships, registry};
use sisukas_core::{
    BooleanOp, Course, DateRange, FilterConfig, FilterError, FilterValue, NumericRange,
    RuleBuilder, apply_filters, build_rule_groups, to_wire,
};

fn course_with_credits(credits: NumericRange) -> Course {
    Course::new("X-1", "X").with_credits(credits)
}

#[test]
fn test_credits_min_equals() {
    let registry = registry(memberships());
    let rule = registry
        .create_rule("credits", "minEquals", Some(5.0.into()))
        .unwrap();

    assert!(rule.evaluate(&course_with_credits(NumericRange::new(5.0, 5.0))));
    assert!(!rule.evaluate(&course_with_credits(NumericRange::new(3.0, 5.0))));
}

#[test]
fn test_level_is_one_of() {
    let registry = registry(memberships());
    let value = FilterValue::from(&["basic-studies", "advanced-studies"][..]);
    let rule = registry.create_rule("level", "isOneOf", Some(value)).unwrap();

    assert!(rule.evaluate(&Course::new("X", "X").with_level("basic-studies")));
    assert!(!rule.evaluate(&Course::new("X", "X").with_level("other-studies")));
}

#[test]
fn test_start_date_between() {
    let registry = registry(memberships());
    let autumn = DateRange::new(date(2025, 9, 1), date(2025, 12, 15));
    let rule = registry
        .create_rule("startDate", "between", Some(autumn.into()))
        .unwrap();

    let course = Course::new("X", "X").with_dates(date(2025, 10, 1), date(2025, 11, 1));
    assert!(rule.evaluate(&course));
}

#[test]
fn test_configs_serialize_to_two_groups() {
    let configs = vec![
        FilterConfig::new(1, "code", "equals").with_value("CS-"),
        FilterConfig::new(2, "level", "equals")
            .with_value("basic-studies")
            .with_op(BooleanOp::Or),
        FilterConfig::new(3, "credits", "minEquals").with_value(5.0),
    ];

    let wire = to_wire(&configs);
    assert_eq!(wire.groups.len(), 2);

    let first: Vec<_> = wire.groups[0]
        .rules
        .iter()
        .map(|r| (r.field.as_str(), r.relation.as_str()))
        .collect();
    let second: Vec<_> = wire.groups[1]
        .rules
        .iter()
        .map(|r| (r.field.as_str(), r.relation.as_str()))
        .collect();
    assert_eq!(first, vec![("code", "equals")]);
    assert_eq!(second, vec![("level", "equals"), ("credits", "minEquals")]);
    assert_eq!(wire.groups[1].rules[1].value, Some(FilterValue::Number(5.0)));
}

#[test]
fn test_membership_follows_source_changes() {
    let sets = memberships();
    let registry = registry(sets.clone());

    assert_matches!(
        registry.create_rule("major", "isMemberOf", Some("NOT-A-MAJOR".into())),
        Err(FilterError::UnknownIdentifier { .. })
    );

    let rule = registry
        .create_rule("major", "isMemberOf", Some("DSD24".into()))
        .unwrap();
    let course = Course::new("CS-A1110", "Programming 1");
    assert!(rule.evaluate(&course));

    sets.remove_value("major", "DSD24", "CS-A1110");
    assert!(!rule.evaluate(&course));
}

#[test]
fn test_and_or_composition_over_catalog() {
    let registry = registry(memberships());
    let courses = catalog();

    // (code starts with CS- AND level is basic) OR (language includes sv)
    let configs = vec![
        FilterConfig::new(1, "code", "startsWith").with_value("CS-"),
        FilterConfig::new(2, "level", "equals").with_value("basic-studies"),
        FilterConfig::new(3, "language", "includes")
            .with_value("sv")
            .with_op(BooleanOp::Or),
    ];
    let groups = build_rule_groups(&configs, &registry).unwrap();
    let kept = apply_filters(&groups, &courses);

    assert_eq!(codes(&kept), vec!["CS-A1110", "CS-A1120", "MS-A0111"]);
}

#[test]
fn test_no_filters_keep_everything() {
    let registry = registry(memberships());
    let courses = catalog();
    let groups = build_rule_groups(&[], &registry).unwrap();
    assert_eq!(apply_filters(&groups, &courses).len(), courses.len());
}

#[test]
fn test_period_and_teacher_filters() {
    let registry = registry(memberships());
    let courses = catalog();

    let configs = vec![
        FilterConfig::new(1, "period", "overlaps").with_value(vec!["2025-II".to_string()]),
        FilterConfig::new(2, "teachers", "includes").with_value("milo"),
    ];
    let groups = build_rule_groups(&configs, &registry).unwrap();
    assert_eq!(codes(&apply_filters(&groups, &courses)), vec!["CS-A1120"]);
}

#[test]
fn test_span_equals_across_periods() {
    let registry = registry(memberships());
    let courses = catalog();

    let rule = registry
        .create_rule(
            "period",
            "equals",
            Some(vec!["2025-I".to_string(), "2025-II".to_string()].into()),
        )
        .unwrap();
    let kept: Vec<&Course> = courses.iter().filter(|c| rule.evaluate(c)).collect();
    assert_eq!(codes(&kept), vec!["CS-E4580"]);
}

#[test]
fn test_enrollment_window_and_invalid_data() {
    let registry = registry(memberships());
    let rule = registry
        .create_rule(
            "enrollment",
            "overlaps",
            Some(DateRange::new(date(2025, 9, 4), date(2025, 9, 4)).into()),
        )
        .unwrap();

    let open = Course::new("A", "A").with_enrollment(date(2025, 8, 4), date(2025, 9, 5));
    let reversed = Course::new("B", "B").with_enrollment(date(2025, 9, 5), date(2025, 8, 4));
    assert!(rule.evaluate(&open));
    assert!(!rule.evaluate(&reversed));
}

#[test]
fn test_nan_credits_never_match() {
    let registry = registry(memberships());
    let rule = registry
        .create_rule("minCredits", "lessThan", Some(100.0.into()))
        .unwrap();
    let broken = Course::new("X", "X").with_credits(NumericRange::point(f64::NAN));
    assert!(!rule.evaluate(&broken));
}

#[test]
fn test_builder_against_course_registry() {
    let registry = registry(memberships());
    let blueprint = registry.resolve("language").unwrap();
    let mut builder = RuleBuilder::new(blueprint);

    builder.set_value("de");
    assert!(!builder.is_complete());
    assert_matches!(builder.build(), Err(FilterError::UnknownValue { .. }));

    builder.set_value("EN");
    let rule = builder.build().unwrap();
    assert_eq!(rule.describe(), "language includes \"EN\"");
    assert!(rule.evaluate(&Course::new("X", "X").with_languages(&["en"])));
}
