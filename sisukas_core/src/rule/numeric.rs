//! Numeric rules

use super::{NumberSelector, Relation, humanize, relation_enum};
use crate::compare::{NumericRange, numeric_range};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

/// Tolerance applied to equality and the inclusive boundary checks.
pub const DEFAULT_EPSILON: f64 = 1e-9;

relation_enum! {
    /// Relations for single-number fields
    NumericRelation {
        Equals => "equals",
        NotEquals => "notEquals",
        GreaterThan => "greaterThan",
        GreaterThanOrEqual => "greaterThanOrEqual",
        LessThan => "lessThan",
        LessThanOrEqual => "lessThanOrEqual",
        Between => "between",
    }
}

/// A relation paired with the value it compares against: a number, or a range
/// for `between`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NumericTest {
    Equals(f64),
    NotEquals(f64),
    GreaterThan(f64),
    GreaterThanOrEqual(f64),
    LessThan(f64),
    LessThanOrEqual(f64),
    Between(NumericRange),
}

impl NumericTest {
    fn relation(&self) -> NumericRelation {
        match self {
            NumericTest::Equals(_) => NumericRelation::Equals,
            NumericTest::NotEquals(_) => NumericRelation::NotEquals,
            NumericTest::GreaterThan(_) => NumericRelation::GreaterThan,
            NumericTest::GreaterThanOrEqual(_) => NumericRelation::GreaterThanOrEqual,
            NumericTest::LessThan(_) => NumericRelation::LessThan,
            NumericTest::LessThanOrEqual(_) => NumericRelation::LessThanOrEqual,
            NumericTest::Between(_) => NumericRelation::Between,
        }
    }

    fn value(&self) -> FilterValue {
        match *self {
            NumericTest::Between(range) => FilterValue::NumericRange(range),
            NumericTest::Equals(n)
            | NumericTest::NotEquals(n)
            | NumericTest::GreaterThan(n)
            | NumericTest::GreaterThanOrEqual(n)
            | NumericTest::LessThan(n)
            | NumericTest::LessThanOrEqual(n) => FilterValue::Number(n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumericRule<E> {
    pub(crate) field: String,
    test: NumericTest,
    epsilon: f64,
    selector: NumberSelector<E>,
}

impl<E> NumericRule<E> {
    pub(crate) fn new(
        field: &str,
        test: NumericTest,
        epsilon: f64,
        selector: NumberSelector<E>,
    ) -> Self {
        Self {
            field: field.to_string(),
            test,
            epsilon,
            selector,
        }
    }

    pub fn relation(&self) -> NumericRelation {
        self.test.relation()
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let value = (self.selector)(entity);
        if !value.is_finite() {
            return false;
        }

        let close = |target: f64| (value - target).abs() < self.epsilon;
        match self.test {
            NumericTest::Equals(target) => close(target),
            NumericTest::NotEquals(target) => !close(target),
            NumericTest::GreaterThan(target) => value > target,
            NumericTest::GreaterThanOrEqual(target) => value > target || close(target),
            NumericTest::LessThan(target) => value < target,
            NumericTest::LessThanOrEqual(target) => value < target || close(target),
            NumericTest::Between(range) => {
                range.is_valid() && numeric_range::contains_number(&range, value)
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
