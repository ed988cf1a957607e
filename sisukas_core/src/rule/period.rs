//! Period rules: compare an entity's date span with academic periods

use super::{DateRangeSelector, Relation, humanize, relation_enum};
use crate::compare::{DateRange, date_range};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    PeriodRelation {
        Overlaps => "overlaps",
        IsCompletelyBefore => "isCompletelyBefore",
        IsCompletelyAfter => "isCompletelyAfter",
        Equals => "equals",
    }
}

/// Compares an entity's span with a selection of periods.
///
/// Period ids are resolved to spans once, when the blueprint builds the rule.
/// `equals` is a span match rather than set equality: with the selected periods
/// sorted by start, the entity must start inside the first and end inside the last.
#[derive(Debug, Clone)]
pub struct PeriodRule<E> {
    pub(crate) field: String,
    pub(crate) relation: PeriodRelation,
    period_ids: Vec<String>,
    spans: Vec<DateRange>,
    selector: DateRangeSelector<E>,
}

impl<E> PeriodRule<E> {
    /// `spans` are the resolved periods. They are kept sorted by start; the ids
    /// keep the order they were selected in.
    pub(crate) fn new(
        field: &str,
        relation: PeriodRelation,
        period_ids: Vec<String>,
        mut spans: Vec<DateRange>,
        selector: DateRangeSelector<E>,
    ) -> Self {
        spans.sort_by_key(|period| period.start);
        Self {
            field: field.to_string(),
            relation,
            period_ids,
            spans,
            selector,
        }
    }

    pub fn period_ids(&self) -> &[String] {
        &self.period_ids
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let span = (self.selector)(entity);
        if !span.is_valid() || self.spans.is_empty() {
            return false;
        }

        match self.relation {
            PeriodRelation::Overlaps => self
                .spans
                .iter()
                .any(|period| date_range::overlaps(&span, period)),
            PeriodRelation::IsCompletelyBefore => self
                .spans
                .iter()
                .all(|period| date_range::is_completely_before(&span, period)),
            PeriodRelation::IsCompletelyAfter => self
                .spans
                .iter()
                .all(|period| date_range::is_completely_after(&span, period)),
            PeriodRelation::Equals => match (self.spans.first(), self.spans.last()) {
                (Some(first), Some(last)) => {
                    date_range::contains_date(first, &span.start)
                        && date_range::contains_date(last, &span.end)
                }
                _ => false,
            },
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} [{}]",
            self.field,
            humanize(self.relation.as_str()),
            self.period_ids.join(", ")
        )
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(
            &self.field,
            self.relation.as_str(),
            Some(FilterValue::List(self.period_ids.clone())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn span(from: (u32, u32), to: (u32, u32)) -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(2025, from.0, from.1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, to.0, to.1, 0, 0, 0).unwrap(),
        )
    }

    fn course_span(range: &DateRange) -> DateRange {
        *range
    }

    // Period I: Sep 1 - Oct 20, Period II: Oct 27 - Dec 15
    fn rule(relation: PeriodRelation, ids: &[&str]) -> PeriodRule<DateRange> {
        let spans = ids
            .iter()
            .map(|id| match *id {
                "I" => span((9, 1), (10, 20)),
                _ => span((10, 27), (12, 15)),
            })
            .collect();
        let ids = ids.iter().map(|id| id.to_string()).collect();
        PeriodRule::new("period", relation, ids, spans, course_span)
    }

    #[test]
    fn test_overlaps_any_selected_period() {
        let rule = rule(PeriodRelation::Overlaps, &["I", "II"]);
        assert!(rule.evaluate(&span((11, 1), (11, 30))));
        assert!(rule.evaluate(&span((10, 15), (10, 25))));
        assert!(!rule.evaluate(&span((10, 21), (10, 26))));
    }

    #[test]
    fn test_completely_before_requires_every_period() {
        let rule = rule(PeriodRelation::IsCompletelyBefore, &["I", "II"]);
        assert!(rule.evaluate(&span((8, 1), (8, 20))));
        assert!(!rule.evaluate(&span((8, 1), (9, 10))));
    }

    #[test]
    fn test_completely_after_requires_every_period() {
        let after_both = rule(PeriodRelation::IsCompletelyAfter, &["I", "II"]);
        assert!(after_both.evaluate(&span((12, 16), (12, 20))));
        assert!(!after_both.evaluate(&span((11, 1), (12, 20))));
        let only_first = rule(PeriodRelation::IsCompletelyAfter, &["I"]);
        assert!(only_first.evaluate(&span((11, 1), (12, 20))));
    }

    #[test]
    fn test_equals_matches_multi_period_span() {
        // Selection order does not matter, the spans are sorted first
        let rule = rule(PeriodRelation::Equals, &["II", "I"]);
        assert!(rule.evaluate(&span((9, 2), (12, 10))));
        assert!(!rule.evaluate(&span((9, 2), (10, 10))));
        assert!(!rule.evaluate(&span((8, 20), (12, 10))));
    }

    #[test]
    fn test_unsorted_selection_keeps_id_order() {
        let rule = rule(PeriodRelation::Equals, &["II", "I"]);
        assert_eq!(rule.period_ids(), ["II".to_string(), "I".to_string()]);
        assert_eq!(rule.describe(), "period equals [II, I]");
        assert_eq!(rule.spans.first().map(|s| s.start), Some(span((9, 1), (9, 1)).start));
        assert!(rule.evaluate(&span((9, 1), (12, 15))));
    }

    #[test]
    fn test_empty_selection_never_matches() {
        let rule = PeriodRule::new(
            "period",
            PeriodRelation::Equals,
            Vec::new(),
            Vec::new(),
            course_span,
        );
        assert!(!rule.evaluate(&span((9, 1), (12, 15))));
    }

    #[test]
    fn test_invalid_entity_span_never_matches() {
        let rule = rule(PeriodRelation::Overlaps, &["I"]);
        assert!(!rule.evaluate(&span((10, 1), (9, 5))));
    }

    #[test]
    fn test_describe_and_record() {
        let rule = rule(PeriodRelation::Overlaps, &["I", "II"]);
        assert_eq!(rule.describe(), "period overlaps [I, II]");
        assert_eq!(
            rule.to_record().value,
            Some(FilterValue::List(vec!["I".to_string(), "II".to_string()]))
        );
    }
}
