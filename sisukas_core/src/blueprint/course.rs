//! Blueprints for the course catalog

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{
    Blueprint, BlueprintRegistry, CategoricalField, DateField, NumericField, NumericRangeField,
    TextField,
};
use crate::FilterError;
use crate::compare::{DateRange, NumericRange};
use crate::course::Course;
use crate::rule::{DateRelation, NumericRangeRelation, NumericRelation, Relation, TextRelation};
use crate::source::{MembershipSource, Period};

const LEVELS: &[&str] = &[
    "basic-studies",
    "intermediate-studies",
    "advanced-studies",
    "other-studies",
];

const LANGUAGES: &[&str] = &["en", "fi", "sv"];

fn code(c: &Course) -> &str {
    &c.code
}

fn name(c: &Course) -> &str {
    &c.name
}

fn organization(c: &Course) -> &str {
    &c.organization
}

fn credits(c: &Course) -> NumericRange {
    c.credits
}

fn min_credits(c: &Course) -> f64 {
    c.credits.min
}

fn start_date(c: &Course) -> DateTime<Utc> {
    c.start_date
}

fn end_date(c: &Course) -> DateTime<Utc> {
    c.end_date
}

fn course_span(c: &Course) -> DateRange {
    c.course_span()
}

fn enrollment_span(c: &Course) -> DateRange {
    c.enrollment_span()
}

fn level(c: &Course) -> &str {
    &c.level
}

fn format(c: &Course) -> &str {
    &c.format
}

fn languages(c: &Course) -> &[String] {
    &c.languages
}

fn teachers(c: &Course) -> &[String] {
    &c.teachers
}

fn tags(c: &Course) -> &[String] {
    &c.tags
}

/// Every filterable course field, in field picker order.
///
/// `memberships` backs the `major` and `minor` fields and `periods` the `period`
/// field. Both are read, never modified.
pub fn course_registry(
    memberships: Arc<dyn MembershipSource>,
    periods: Arc<[Period]>,
) -> Result<BlueprintRegistry<Course>, FilterError> {
    BlueprintRegistry::from_blueprints(vec![
        Blueprint::new(
            "code",
            "Course code",
            TextField::new(code).relations(TextRelation::ALL, TextRelation::StartsWith),
        ),
        Blueprint::text("name", "Name", name),
        Blueprint::text("organization", "Organization", organization),
        Blueprint::new(
            "credits",
            "Credits",
            NumericRangeField::new(credits).relations(
                NumericRangeRelation::ALL,
                NumericRangeRelation::ContainsNumber,
            ),
        ),
        Blueprint::new(
            "minCredits",
            "Minimum credits",
            NumericField::new(min_credits)
                .relations(NumericRelation::ALL, NumericRelation::GreaterThanOrEqual),
        ),
        Blueprint::new(
            "startDate",
            "Start date",
            DateField::new(start_date).relations(DateRelation::ALL, DateRelation::OnOrAfter),
        ),
        Blueprint::new(
            "endDate",
            "End date",
            DateField::new(end_date).relations(DateRelation::ALL, DateRelation::OnOrBefore),
        ),
        Blueprint::date_range("courseDate", "Course dates", course_span),
        Blueprint::date_range("enrollment", "Enrollment period", enrollment_span),
        Blueprint::new(
            "level",
            "Level",
            CategoricalField::single(level).valid_values(LEVELS),
        ),
        Blueprint::single_choice("format", "Format", format),
        Blueprint::new(
            "language",
            "Teaching language",
            CategoricalField::multi(languages).valid_values(LANGUAGES),
        ),
        Blueprint::new(
            "teachers",
            "Teachers",
            CategoricalField::multi(teachers).partial(true),
        ),
        Blueprint::multi_choice("tags", "Tags", tags),
        Blueprint::membership("major", "Major", "major", memberships.clone(), code),
        Blueprint::membership("minor", "Minor", "minor", memberships, code),
        Blueprint::period("period", "Period", periods, course_span),
    ])
}
