//! Date rules

use chrono::{DateTime, NaiveTime, Utc};

use super::{DateSelector, Relation, humanize, relation_enum};
use crate::compare::{DateRange, date_range};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    /// Relations for single-date fields
    DateRelation {
        Before => "before",
        After => "after",
        OnOrBefore => "onOrBefore",
        OnOrAfter => "onOrAfter",
        Equals => "equals",
        Between => "between",
    }
}

/// A relation paired with the date, or for `between` the range, it compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DateTest {
    Before(DateTime<Utc>),
    After(DateTime<Utc>),
    OnOrBefore(DateTime<Utc>),
    OnOrAfter(DateTime<Utc>),
    Equals(DateTime<Utc>),
    Between(DateRange),
}

impl DateTest {
    fn relation(&self) -> DateRelation {
        match self {
            DateTest::Before(_) => DateRelation::Before,
            DateTest::After(_) => DateRelation::After,
            DateTest::OnOrBefore(_) => DateRelation::OnOrBefore,
            DateTest::OnOrAfter(_) => DateRelation::OnOrAfter,
            DateTest::Equals(_) => DateRelation::Equals,
            DateTest::Between(_) => DateRelation::Between,
        }
    }

    fn value(&self) -> FilterValue {
        match *self {
            DateTest::Between(range) => FilterValue::DateRange(range),
            DateTest::Before(date)
            | DateTest::After(date)
            | DateTest::OnOrBefore(date)
            | DateTest::OnOrAfter(date)
            | DateTest::Equals(date) => FilterValue::Date(date),
        }
    }
}

/// Compares a date field against a date or a date range.
///
/// With `ignore_time` set, both dates are truncated to UTC midnight first, so values
/// on the same calendar day compare equal. `between` always compares exact instants.
#[derive(Debug, Clone)]
pub struct DateRule<E> {
    pub(crate) field: String,
    test: DateTest,
    ignore_time: bool,
    selector: DateSelector<E>,
}

impl<E> DateRule<E> {
    pub(crate) fn new(
        field: &str,
        test: DateTest,
        ignore_time: bool,
        selector: DateSelector<E>,
    ) -> Self {
        Self {
            field: field.to_string(),
            test,
            ignore_time,
            selector,
        }
    }

    pub fn relation(&self) -> DateRelation {
        self.test.relation()
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let value = (self.selector)(entity);
        let day = |date: DateTime<Utc>| {
            if self.ignore_time {
                start_of_day(&date)
            } else {
                date
            }
        };

        match self.test {
            DateTest::Before(target) => day(value) < day(target),
            DateTest::After(target) => day(value) > day(target),
            DateTest::OnOrBefore(target) => day(value) <= day(target),
            DateTest::OnOrAfter(target) => day(value) >= day(target),
            DateTest::Equals(target) => day(value) == day(target),
            DateTest::Between(range) => {
                range.is_valid() && date_range::contains_date(&range, &value)
            }
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.field,
            humanize(self.relation().as_str()),
            self.test.value()
        )
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(&self.field, self.relation().as_str(), Some(self.test.value()))
    }
}

fn start_of_day(date: &DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive().and_time(NaiveTime::MIN).and_utc()
}
