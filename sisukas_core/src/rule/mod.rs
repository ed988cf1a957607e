//! Relation rules: immutable predicates built by blueprints
//!
//! Each field category has its own relation enum and rule type. [`Rule`] is the
//! closed union over them, so evaluation and serialization match exhaustively.

mod categorical;
mod date;
mod date_range;
mod membership;
mod numeric;
mod numeric_range;
mod period;
mod text;

pub use categorical::{CategoricalRelation, CategoricalRule, CategoricalSelector};
pub use date::{DateRelation, DateRule};
pub use date_range::{DateRangeRelation, DateRangeRule};
pub use membership::{MembershipRelation, MembershipRule};
pub use numeric::{DEFAULT_EPSILON, NumericRelation, NumericRule};
pub use numeric_range::{NumericRangeRelation, NumericRangeRule};
pub use period::{PeriodRelation, PeriodRule};
pub use text::{TextRelation, TextRule};

pub(crate) use categorical::{ArrayTest, ScalarTest};
pub(crate) use date::DateTest;
pub(crate) use numeric::NumericTest;
pub(crate) use numeric_range::{Comparison, RangeTest};

use chrono::{DateTime, Utc};
use convert_case::{Case, Casing};

use crate::compare::{DateRange, NumericRange};
use crate::wire::SerializedRule;

/// Reads a text field from an entity.
pub type TextSelector<E> = for<'a> fn(&'a E) -> &'a str;
/// Reads a list-of-strings field from an entity.
pub type ListSelector<E> = for<'a> fn(&'a E) -> &'a [String];
pub type NumberSelector<E> = fn(&E) -> f64;
pub type NumericRangeSelector<E> = fn(&E) -> NumericRange;
pub type DateSelector<E> = fn(&E) -> DateTime<Utc>;
pub type DateRangeSelector<E> = fn(&E) -> DateRange;

/// An operator scoped to one field category.
pub trait Relation: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Every relation of the category, in declaration order.
    const ALL: &'static [Self];

    /// Wire name, e.g. `"minEquals"`.
    fn as_str(&self) -> &'static str;

    /// Relations like `isEmpty` that take no value.
    fn is_nullary(&self) -> bool;

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == raw)
    }
}

/// Declares a relation enum together with its wire names.
macro_rules! relation_enum {
    (@nullary nullary) => { true };
    (@nullary) => { false };
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal $(($nullary:ident))?),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::rule::Relation for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            fn is_nullary(&self) -> bool {
                match self {
                    $(Self::$variant => relation_enum!(@nullary $($nullary)?)),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::rule::Relation::as_str(self))
            }
        }
    };
}
pub(crate) use relation_enum;

/// Turn a wire relation name into prose: `"minEquals"` becomes `"min equals"`.
pub(crate) fn humanize(relation: &str) -> String {
    relation.to_case(Case::Lower)
}

/// A built, immutable predicate over entities of type `E`.
#[derive(Debug, Clone)]
pub enum Rule<E> {
    Text(TextRule<E>),
    Numeric(NumericRule<E>),
    NumericRange(NumericRangeRule<E>),
    Date(DateRule<E>),
    DateRange(DateRangeRule<E>),
    Categorical(CategoricalRule<E>),
    Membership(MembershipRule<E>),
    Period(PeriodRule<E>),
}

impl<E> Rule<E> {
    /// Check whether an entity satisfies this rule. Never fails: malformed field
    /// data evaluates to `false`.
    pub fn evaluate(&self, entity: &E) -> bool {
        match self {
            Rule::Text(rule) => rule.evaluate(entity),
            Rule::Numeric(rule) => rule.evaluate(entity),
            Rule::NumericRange(rule) => rule.evaluate(entity),
            Rule::Date(rule) => rule.evaluate(entity),
            Rule::DateRange(rule) => rule.evaluate(entity),
            Rule::Categorical(rule) => rule.evaluate(entity),
            Rule::Membership(rule) => rule.evaluate(entity),
            Rule::Period(rule) => rule.evaluate(entity),
        }
    }

    /// Human readable summary, e.g. `credits min equals 5`.
    pub fn describe(&self) -> String {
        match self {
            Rule::Text(rule) => rule.describe(),
            Rule::Numeric(rule) => rule.describe(),
            Rule::NumericRange(rule) => rule.describe(),
            Rule::Date(rule) => rule.describe(),
            Rule::DateRange(rule) => rule.describe(),
            Rule::Categorical(rule) => rule.describe(),
            Rule::Membership(rule) => rule.describe(),
            Rule::Period(rule) => rule.describe(),
        }
    }

    /// The wire record for this rule.
    pub fn to_record(&self) -> SerializedRule {
        match self {
            Rule::Text(rule) => rule.to_record(),
            Rule::Numeric(rule) => rule.to_record(),
            Rule::NumericRange(rule) => rule.to_record(),
            Rule::Date(rule) => rule.to_record(),
            Rule::DateRange(rule) => rule.to_record(),
            Rule::Categorical(rule) => rule.to_record(),
            Rule::Membership(rule) => rule.to_record(),
            Rule::Period(rule) => rule.to_record(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Rule::Text(rule) => &rule.field,
            Rule::Numeric(rule) => &rule.field,
            Rule::NumericRange(rule) => &rule.field,
            Rule::Date(rule) => &rule.field,
            Rule::DateRange(rule) => &rule.field,
            Rule::Categorical(rule) => &rule.field,
            Rule::Membership(rule) => &rule.field,
            Rule::Period(rule) => &rule.field,
        }
    }

    pub fn relation(&self) -> &'static str {
        match self {
            Rule::Text(rule) => rule.relation().as_str(),
            Rule::Numeric(rule) => rule.relation().as_str(),
            Rule::NumericRange(rule) => rule.relation().as_str(),
            Rule::Date(rule) => rule.relation().as_str(),
            Rule::DateRange(rule) => rule.relation.as_str(),
            Rule::Categorical(rule) => rule.relation().as_str(),
            Rule::Membership(rule) => rule.relation.as_str(),
            Rule::Period(rule) => rule.relation.as_str(),
        }
    }
}
