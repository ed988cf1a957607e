//! Per-category blueprint payloads
//!
//! Each payload owns the field's relation set, its selector and its category
//! options, and knows how to turn a `(relation, value)` pair into a rule.

use std::sync::Arc;

use super::RelationSet;
use super::value_check::ValueCheck;
use crate::FilterError;
use crate::compare::{DateRange, MatchOptions, array};
use crate::rule::{
    ArrayTest, CategoricalRelation, CategoricalRule, CategoricalSelector, Comparison,
    DEFAULT_EPSILON, DateRangeRelation, DateRangeRule, DateRangeSelector, DateRelation,
    DateRule, DateSelector, DateTest, ListSelector, MembershipRelation, MembershipRule,
    NumberSelector, NumericRangeRelation, NumericRangeRule, NumericRangeSelector,
    NumericRelation, NumericRule, NumericTest, PeriodRelation, PeriodRule, RangeTest, Relation,
    Rule, ScalarTest, TextRelation, TextRule, TextSelector,
};
use crate::source::{MembershipSource, Period};
use crate::value::FilterValue;

/// Free-text field. Trimmed and case-insensitive unless configured otherwise.
#[derive(Debug)]
pub struct TextField<E> {
    pub(super) relations: RelationSet<TextRelation>,
    selector: TextSelector<E>,
    case_sensitive: bool,
    trim: bool,
}

impl<E> TextField<E> {
    pub fn new(selector: TextSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(TextRelation::Contains),
            selector,
            case_sensitive: false,
            trim: true,
        }
    }

    pub fn relations(mut self, relations: &[TextRelation], default: TextRelation) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let text = check.text(check.required(value)?)?;

        let rule = TextRule::new(
            field,
            relation,
            text,
            self.case_sensitive,
            self.trim,
            self.selector,
        )?;
        Ok(Rule::Text(rule))
    }
}

#[derive(Debug)]
pub struct NumericField<E> {
    pub(super) relations: RelationSet<NumericRelation>,
    selector: NumberSelector<E>,
    epsilon: f64,
}

impl<E> NumericField<E> {
    pub fn new(selector: NumberSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(NumericRelation::Equals),
            selector,
            epsilon: DEFAULT_EPSILON,
        }
    }

    pub fn relations(mut self, relations: &[NumericRelation], default: NumericRelation) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    /// Tolerance for `equals` and the inclusive comparisons.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon.abs();
        self
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let value = check.required(value)?;

        let test = match relation {
            NumericRelation::Equals => NumericTest::Equals(check.number(value)?),
            NumericRelation::NotEquals => NumericTest::NotEquals(check.number(value)?),
            NumericRelation::GreaterThan => NumericTest::GreaterThan(check.number(value)?),
            NumericRelation::GreaterThanOrEqual => {
                NumericTest::GreaterThanOrEqual(check.number(value)?)
            }
            NumericRelation::LessThan => NumericTest::LessThan(check.number(value)?),
            NumericRelation::LessThanOrEqual => {
                NumericTest::LessThanOrEqual(check.number(value)?)
            }
            NumericRelation::Between => NumericTest::Between(check.numeric_range(value)?),
        };
        Ok(Rule::Numeric(NumericRule::new(field, test, self.epsilon, self.selector)))
    }
}

#[derive(Debug)]
pub struct NumericRangeField<E> {
    pub(super) relations: RelationSet<NumericRangeRelation>,
    selector: NumericRangeSelector<E>,
}

impl<E> NumericRangeField<E> {
    pub fn new(selector: NumericRangeSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(NumericRangeRelation::Overlaps),
            selector,
        }
    }

    pub fn relations(
        mut self,
        relations: &[NumericRangeRelation],
        default: NumericRangeRelation,
    ) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let value = check.required(value)?;

        let test = match relation.comparison() {
            Comparison::Range(comparison) => {
                RangeTest::Range(comparison, check.numeric_range(value)?)
            }
            Comparison::Number(comparison) => RangeTest::Number(comparison, check.number(value)?),
        };
        Ok(Rule::NumericRange(NumericRangeRule::new(field, test, self.selector)))
    }
}

#[derive(Debug)]
pub struct DateField<E> {
    pub(super) relations: RelationSet<DateRelation>,
    selector: DateSelector<E>,
    ignore_time: bool,
}

impl<E> DateField<E> {
    pub fn new(selector: DateSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(DateRelation::OnOrAfter),
            selector,
            ignore_time: true,
        }
    }

    pub fn relations(mut self, relations: &[DateRelation], default: DateRelation) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    /// Compare calendar days rather than instants. On by default.
    pub fn ignore_time(mut self, ignore_time: bool) -> Self {
        self.ignore_time = ignore_time;
        self
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let value = check.required(value)?;

        let test = match relation {
            DateRelation::Before => DateTest::Before(check.date(value)?),
            DateRelation::After => DateTest::After(check.date(value)?),
            DateRelation::OnOrBefore => DateTest::OnOrBefore(check.date(value)?),
            DateRelation::OnOrAfter => DateTest::OnOrAfter(check.date(value)?),
            DateRelation::Equals => DateTest::Equals(check.date(value)?),
            DateRelation::Between => DateTest::Between(check.date_range(value)?),
        };
        Ok(Rule::Date(DateRule::new(field, test, self.ignore_time, self.selector)))
    }
}

#[derive(Debug)]
pub struct DateRangeField<E> {
    pub(super) relations: RelationSet<DateRangeRelation>,
    selector: DateRangeSelector<E>,
}

impl<E> DateRangeField<E> {
    pub fn new(selector: DateRangeSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(DateRangeRelation::Overlaps),
            selector,
        }
    }

    pub fn relations(
        mut self,
        relations: &[DateRangeRelation],
        default: DateRangeRelation,
    ) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let range = check.date_range(check.required(value)?)?;

        Ok(Rule::DateRange(DateRangeRule::new(
            field,
            relation,
            range,
            self.selector,
        )))
    }
}

const SINGLE_RELATIONS: &[CategoricalRelation] = &[
    CategoricalRelation::Equals,
    CategoricalRelation::NotEquals,
    CategoricalRelation::IsOneOf,
    CategoricalRelation::IsNotOneOf,
];

const MULTI_RELATIONS: &[CategoricalRelation] = &[
    CategoricalRelation::Includes,
    CategoricalRelation::NotIncludes,
    CategoricalRelation::IncludesAny,
    CategoricalRelation::IncludesAll,
    CategoricalRelation::IsEmpty,
    CategoricalRelation::IsNotEmpty,
];

/// A field drawn from a vocabulary, holding one value or a list of values.
///
/// Matching is case-insensitive and exact by default. When `valid_values` is set,
/// every value a rule is built with must be one of them.
#[derive(Debug)]
pub struct CategoricalField<E> {
    pub(super) relations: RelationSet<CategoricalRelation>,
    selector: CategoricalSelector<E>,
    pub(super) valid_values: Option<Vec<String>>,
    options: MatchOptions,
}

impl<E> CategoricalField<E> {
    /// A single-valued field such as a course level.
    pub fn single(selector: TextSelector<E>) -> Self {
        Self {
            relations: RelationSet::of(SINGLE_RELATIONS, CategoricalRelation::Equals),
            selector: CategoricalSelector::Single(selector),
            valid_values: None,
            options: MatchOptions::default(),
        }
    }

    /// A list-valued field such as teaching languages.
    pub fn multi(selector: ListSelector<E>) -> Self {
        Self {
            relations: RelationSet::of(MULTI_RELATIONS, CategoricalRelation::Includes),
            selector: CategoricalSelector::Multi(selector),
            valid_values: None,
            options: MatchOptions::default(),
        }
    }

    pub fn relations(
        mut self,
        relations: &[CategoricalRelation],
        default: CategoricalRelation,
    ) -> Self {
        self.relations = RelationSet::of(relations, default);
        self
    }

    pub fn valid_values(mut self, values: &[&str]) -> Self {
        self.valid_values = Some(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.options.case_sensitive = case_sensitive;
        self
    }

    /// Match substrings in either direction instead of whole values.
    pub fn partial(mut self, partial: bool) -> Self {
        self.options.partial = partial;
        self
    }

    pub fn is_multi(&self) -> bool {
        self.selector.is_multi()
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        if relation.needs_list_field() != self.selector.is_multi() {
            return Err(FilterError::ShapeMismatch {
                field: field.to_string(),
                relation: relation.as_str().to_string(),
            });
        }

        let check = ValueCheck::new(field, relation);
        let rule = match self.selector {
            CategoricalSelector::Single(selector) => {
                let value = check.required(value)?;
                let test = match relation {
                    CategoricalRelation::IsOneOf => {
                        ScalarTest::IsOneOf(self.allowed_list(field, &check, value)?)
                    }
                    CategoricalRelation::IsNotOneOf => {
                        ScalarTest::IsNotOneOf(self.allowed_list(field, &check, value)?)
                    }
                    CategoricalRelation::NotEquals => {
                        ScalarTest::NotEquals(self.allowed_text(field, &check, value)?)
                    }
                    _ => ScalarTest::Equals(self.allowed_text(field, &check, value)?),
                };
                CategoricalRule::scalar(field, selector, test, self.options)
            }
            CategoricalSelector::Multi(selector) => {
                let test = match relation {
                    CategoricalRelation::IsEmpty => {
                        check.absent(value)?;
                        ArrayTest::IsEmpty
                    }
                    CategoricalRelation::IsNotEmpty => {
                        check.absent(value)?;
                        ArrayTest::IsNotEmpty
                    }
                    CategoricalRelation::IncludesAny => {
                        let value = check.required(value)?;
                        ArrayTest::IncludesAny(self.allowed_list(field, &check, value)?)
                    }
                    CategoricalRelation::IncludesAll => {
                        let value = check.required(value)?;
                        ArrayTest::IncludesAll(self.allowed_list(field, &check, value)?)
                    }
                    CategoricalRelation::NotIncludes => {
                        let value = check.required(value)?;
                        ArrayTest::NotIncludes(self.allowed_text(field, &check, value)?)
                    }
                    _ => {
                        let value = check.required(value)?;
                        ArrayTest::Includes(self.allowed_text(field, &check, value)?)
                    }
                };
                CategoricalRule::array(field, selector, test, self.options)
            }
        };
        Ok(Rule::Categorical(rule))
    }

    fn allowed_text(
        &self,
        field: &str,
        check: &ValueCheck<'_>,
        value: FilterValue,
    ) -> Result<String, FilterError> {
        let text = check.text(value)?;
        self.ensure_allowed(field, &text)?;
        Ok(text)
    }

    fn allowed_list(
        &self,
        field: &str,
        check: &ValueCheck<'_>,
        value: FilterValue,
    ) -> Result<Vec<String>, FilterError> {
        let items = check.list(value)?;
        for item in &items {
            self.ensure_allowed(field, item)?;
        }
        Ok(items)
    }

    fn ensure_allowed(&self, field: &str, value: &str) -> Result<(), FilterError> {
        let Some(valid) = &self.valid_values else {
            return Ok(());
        };
        let exact = MatchOptions {
            partial: false,
            ..self.options
        };
        if array::includes(valid, value, &exact) {
            Ok(())
        } else {
            Err(FilterError::UnknownValue {
                field: field.to_string(),
                value: value.to_string(),
                valid: valid.clone(),
            })
        }
    }
}

/// Membership in a named set from an external source, e.g. a major's curriculum.
///
/// The value is the set identifier. It is checked against the source once when the
/// rule is built; the set contents are read again on every evaluation.
#[derive(Debug)]
pub struct MembershipField<E> {
    pub(super) relations: RelationSet<MembershipRelation>,
    selector: TextSelector<E>,
    pub(super) category: String,
    pub(super) source: Arc<dyn MembershipSource>,
}

impl<E> MembershipField<E> {
    pub fn new(
        category: &str,
        source: Arc<dyn MembershipSource>,
        selector: TextSelector<E>,
    ) -> Self {
        Self {
            relations: RelationSet::all(MembershipRelation::IsMemberOf),
            selector,
            category: category.to_string(),
            source,
        }
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let identifier = check.text(check.required(value)?)?;

        if !self.source.has_set(&self.category, &identifier) {
            return Err(FilterError::UnknownIdentifier {
                field: field.to_string(),
                category: self.category.clone(),
                identifier,
            });
        }

        Ok(Rule::Membership(MembershipRule::new(
            field,
            relation,
            &self.category,
            identifier,
            self.source.clone(),
            self.selector,
        )))
    }
}

/// Comparison of an entity's span with academic periods, selected by id.
#[derive(Debug)]
pub struct PeriodField<E> {
    pub(super) relations: RelationSet<PeriodRelation>,
    selector: DateRangeSelector<E>,
    pub(super) periods: Arc<[Period]>,
}

impl<E> PeriodField<E> {
    pub fn new(periods: Arc<[Period]>, selector: DateRangeSelector<E>) -> Self {
        Self {
            relations: RelationSet::all(PeriodRelation::Overlaps),
            selector,
            periods,
        }
    }

    pub(super) fn create_rule(
        &self,
        field: &str,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let relation = self.relations.parse(field, relation)?;
        let check = ValueCheck::new(field, relation);
        let period_ids = check.list(check.required(value)?)?;

        let spans = period_ids
            .iter()
            .map(|id| self.resolve(field, id))
            .collect::<Result<Vec<DateRange>, FilterError>>()?;

        Ok(Rule::Period(PeriodRule::new(
            field,
            relation,
            period_ids,
            spans,
            self.selector,
        )))
    }

    fn resolve(&self, field: &str, id: &str) -> Result<DateRange, FilterError> {
        self.periods
            .iter()
            .find(|period| period.id == id)
            .map(Period::span)
            .ok_or_else(|| FilterError::UnknownPeriod {
                field: field.to_string(),
                period_id: id.to_string(),
            })
    }
}
