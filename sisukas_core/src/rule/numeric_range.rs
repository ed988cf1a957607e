//! Numeric range rules

use super::{NumericRangeSelector, Relation, humanize, relation_enum};
use crate::compare::{NumericRange, numeric_range as nr};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    /// Relations for range-valued numeric fields such as credits
    NumericRangeRelation {
        Overlaps => "overlaps",
        Within => "within",
        Contains => "contains",
        Equals => "equals",
        ContainsNumber => "containsNumber",
        Includes => "includes",
        MinAtLeast => "minAtLeast",
        MinAtMost => "minAtMost",
        MinEquals => "minEquals",
        MaxAtLeast => "maxAtLeast",
        MaxAtMost => "maxAtMost",
        MaxEquals => "maxEquals",
        SpanAtLeast => "spanAtLeast",
        SpanAtMost => "spanAtMost",
        SpanEquals => "spanEquals",
    }
}

/// A range relation stripped of its value: either range against range, or a
/// number read off the field range against a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Range(RangeComparison),
    Number(NumberComparison),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeComparison {
    Overlaps,
    Within,
    Contains,
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberComparison {
    ContainsNumber,
    Includes,
    MinAtLeast,
    MinAtMost,
    MinEquals,
    MaxAtLeast,
    MaxAtMost,
    MaxEquals,
    SpanAtLeast,
    SpanAtMost,
    SpanEquals,
}

impl NumericRangeRelation {
    pub(crate) fn comparison(&self) -> Comparison {
        use NumberComparison as N;
        use RangeComparison as R;
        match self {
            NumericRangeRelation::Overlaps => Comparison::Range(R::Overlaps),
            NumericRangeRelation::Within => Comparison::Range(R::Within),
            NumericRangeRelation::Contains => Comparison::Range(R::Contains),
            NumericRangeRelation::Equals => Comparison::Range(R::Equals),
            NumericRangeRelation::ContainsNumber => Comparison::Number(N::ContainsNumber),
            NumericRangeRelation::Includes => Comparison::Number(N::Includes),
            NumericRangeRelation::MinAtLeast => Comparison::Number(N::MinAtLeast),
            NumericRangeRelation::MinAtMost => Comparison::Number(N::MinAtMost),
            NumericRangeRelation::MinEquals => Comparison::Number(N::MinEquals),
            NumericRangeRelation::MaxAtLeast => Comparison::Number(N::MaxAtLeast),
            NumericRangeRelation::MaxAtMost => Comparison::Number(N::MaxAtMost),
            NumericRangeRelation::MaxEquals => Comparison::Number(N::MaxEquals),
            NumericRangeRelation::SpanAtLeast => Comparison::Number(N::SpanAtLeast),
            NumericRangeRelation::SpanAtMost => Comparison::Number(N::SpanAtMost),
            NumericRangeRelation::SpanEquals => Comparison::Number(N::SpanEquals),
        }
    }

    /// Relations that compare the field against another range rather than a number.
    pub fn compares_ranges(&self) -> bool {
        matches!(self.comparison(), Comparison::Range(_))
    }
}

impl RangeComparison {
    fn relation(&self) -> NumericRangeRelation {
        match self {
            RangeComparison::Overlaps => NumericRangeRelation::Overlaps,
            RangeComparison::Within => NumericRangeRelation::Within,
            RangeComparison::Contains => NumericRangeRelation::Contains,
            RangeComparison::Equals => NumericRangeRelation::Equals,
        }
    }

    fn holds(&self, field: &NumericRange, other: &NumericRange) -> bool {
        match self {
            RangeComparison::Overlaps => nr::overlaps(field, other),
            RangeComparison::Within => nr::contains(other, field),
            RangeComparison::Contains => nr::contains(field, other),
            RangeComparison::Equals => nr::equals(field, other),
        }
    }
}

impl NumberComparison {
    fn relation(&self) -> NumericRangeRelation {
        match self {
            NumberComparison::ContainsNumber => NumericRangeRelation::ContainsNumber,
            NumberComparison::Includes => NumericRangeRelation::Includes,
            NumberComparison::MinAtLeast => NumericRangeRelation::MinAtLeast,
            NumberComparison::MinAtMost => NumericRangeRelation::MinAtMost,
            NumberComparison::MinEquals => NumericRangeRelation::MinEquals,
            NumberComparison::MaxAtLeast => NumericRangeRelation::MaxAtLeast,
            NumberComparison::MaxAtMost => NumericRangeRelation::MaxAtMost,
            NumberComparison::MaxEquals => NumericRangeRelation::MaxEquals,
            NumberComparison::SpanAtLeast => NumericRangeRelation::SpanAtLeast,
            NumberComparison::SpanAtMost => NumericRangeRelation::SpanAtMost,
            NumberComparison::SpanEquals => NumericRangeRelation::SpanEquals,
        }
    }

    fn holds(&self, field: &NumericRange, n: f64) -> bool {
        match self {
            NumberComparison::ContainsNumber | NumberComparison::Includes => {
                nr::contains_number(field, n)
            }
            NumberComparison::MinAtLeast => nr::min_at_least(field, n),
            NumberComparison::MinAtMost => nr::min_at_most(field, n),
            NumberComparison::MinEquals => nr::min_equals(field, n),
            NumberComparison::MaxAtLeast => nr::max_at_least(field, n),
            NumberComparison::MaxAtMost => nr::max_at_most(field, n),
            NumberComparison::MaxEquals => nr::max_equals(field, n),
            NumberComparison::SpanAtLeast => nr::span_at_least(field, n),
            NumberComparison::SpanAtMost => nr::span_at_most(field, n),
            NumberComparison::SpanEquals => nr::span_equals(field, n),
        }
    }
}

/// A comparison paired with a value of the shape it reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RangeTest {
    Range(RangeComparison, NumericRange),
    Number(NumberComparison, f64),
}

impl RangeTest {
    fn relation(&self) -> NumericRangeRelation {
        match self {
            RangeTest::Range(comparison, _) => comparison.relation(),
            RangeTest::Number(comparison, _) => comparison.relation(),
        }
    }

    fn value(&self) -> FilterValue {
        match *self {
            RangeTest::Range(_, range) => FilterValue::NumericRange(range),
            RangeTest::Number(_, n) => FilterValue::Number(n),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NumericRangeRule<E> {
    pub(crate) field: String,
    test: RangeTest,
    selector: NumericRangeSelector<E>,
}

impl<E> NumericRangeRule<E> {
    pub(crate) fn new(field: &str, test: RangeTest, selector: NumericRangeSelector<E>) -> Self {
        Self {
            field: field.to_string(),
            test,
            selector,
        }
    }

    pub fn relation(&self) -> NumericRangeRelation {
        self.test.relation()
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let field = (self.selector)(entity);
        if !field.is_valid() {
            return false;
        }

        match self.test {
            RangeTest::Range(comparison, other) => {
                other.is_valid() && comparison.holds(&field, &other)
            }
            RangeTest::Number(comparison, n) => n.is_finite() && comparison.holds(&field, n),
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
