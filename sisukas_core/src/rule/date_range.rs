//! Date range rules

use super::{DateRangeSelector, Relation, humanize, relation_enum};
use crate::compare::{DateRange, date_range};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    /// Relations for range-valued date fields such as the enrollment window
    DateRangeRelation {
        Overlaps => "overlaps",
        Within => "within",
        Contains => "contains",
        Equals => "equals",
    }
}

#[derive(Debug, Clone)]
pub struct DateRangeRule<E> {
    pub(crate) field: String,
    pub(crate) relation: DateRangeRelation,
    range: DateRange,
    selector: DateRangeSelector<E>,
}

impl<E> DateRangeRule<E> {
    pub(crate) fn new(
        field: &str,
        relation: DateRangeRelation,
        range: DateRange,
        selector: DateRangeSelector<E>,
    ) -> Self {
        Self {
            field: field.to_string(),
            relation,
            range,
            selector,
        }
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let field = (self.selector)(entity);
        if !field.is_valid() || !self.range.is_valid() {
            return false;
        }

        match self.relation {
            DateRangeRelation::Overlaps => date_range::overlaps(&field, &self.range),
            DateRangeRelation::Within => date_range::is_within_range(&field, &self.range),
            DateRangeRelation::Contains => date_range::contains(&field, &self.range),
            DateRangeRelation::Equals => date_range::equals(&field, &self.range),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.field,
            humanize(self.relation.as_str()),
            self.range
        )
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(
            &self.field,
            self.relation.as_str(),
            Some(FilterValue::DateRange(self.range)),
        )
    }
}
