//! Field blueprints: the single place where `(relation, value)` pairs are validated
//!
//! A blueprint describes one filterable field: its key, its category, the closed
//! set of relations it accepts and how to read it from an entity. Building a rule
//! checks, in order, that the relation is legal for the field, that the value has
//! the shape the relation needs, and then instantiates the rule.

mod course;
mod fields;
mod registry;
mod value_check;

pub use course::course_registry;
pub use fields::{
    CategoricalField, DateField, DateRangeField, MembershipField, NumericField,
    NumericRangeField, PeriodField, TextField,
};
pub use registry::BlueprintRegistry;

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::FilterError;
use crate::rule::{
    DateRangeSelector, DateSelector, ListSelector, NumberSelector, NumericRangeSelector,
    Relation, Rule, TextSelector,
};
use crate::source::{MembershipSource, Period};
use crate::value::FilterValue;

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Text,
    Numeric,
    NumericRange,
    Date,
    DateRange,
    Categorical,
    Membership,
    Period,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Text => "text",
            Category::Numeric => "numeric",
            Category::NumericRange => "numeric-range",
            Category::Date => "date",
            Category::DateRange => "date-range",
            Category::Categorical => "categorical",
            Category::Membership => "membership",
            Category::Period => "period",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The relations a field accepts, and the one a form preselects.
#[derive(Debug, Clone)]
pub struct RelationSet<R> {
    relations: Vec<R>,
    default: R,
}

impl<R: Relation> RelationSet<R> {
    /// Every relation of the category.
    pub fn all(default: R) -> Self {
        Self {
            relations: R::ALL.to_vec(),
            default,
        }
    }

    /// A subset. The default is always part of the set, added in front if missing.
    pub fn of(relations: &[R], default: R) -> Self {
        let mut relations = relations.to_vec();
        if !relations.contains(&default) {
            relations.insert(0, default);
        }
        Self { relations, default }
    }

    pub fn relations(&self) -> &[R] {
        &self.relations
    }

    pub fn default_relation(&self) -> R {
        self.default
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.relations.iter().map(|r| r.as_str()).collect()
    }

    pub fn contains_name(&self, raw: &str) -> bool {
        self.find(raw).is_some()
    }

    fn find(&self, raw: &str) -> Option<R> {
        self.relations.iter().copied().find(|r| r.as_str() == raw)
    }

    pub(crate) fn parse(&self, field: &str, raw: &str) -> Result<R, FilterError> {
        self.find(raw).ok_or_else(|| FilterError::InvalidRelation {
            field: field.to_string(),
            relation: raw.to_string(),
            valid: self.names().into_iter().map(String::from).collect(),
        })
    }
}

/// Category tag plus the category's payload.
#[derive(Debug)]
pub enum BlueprintKind<E> {
    Text(TextField<E>),
    Numeric(NumericField<E>),
    NumericRange(NumericRangeField<E>),
    Date(DateField<E>),
    DateRange(DateRangeField<E>),
    Categorical(CategoricalField<E>),
    Membership(MembershipField<E>),
    Period(PeriodField<E>),
}

macro_rules! kind_from_field {
    ($($variant:ident($field:ident)),+ $(,)?) => {
        $(
            impl<E> From<$field<E>> for BlueprintKind<E> {
                fn from(field: $field<E>) -> Self {
                    BlueprintKind::$variant(field)
                }
            }
        )+
    };
}

kind_from_field! {
    Text(TextField),
    Numeric(NumericField),
    NumericRange(NumericRangeField),
    Date(DateField),
    DateRange(DateRangeField),
    Categorical(CategoricalField),
    Membership(MembershipField),
    Period(PeriodField),
}

/// Describes one filterable field of entities of type `E`.
#[derive(Debug)]
pub struct Blueprint<E> {
    key: String,
    label: String,
    kind: BlueprintKind<E>,
}

impl<E> Blueprint<E> {
    pub fn new(key: &str, label: &str, kind: impl Into<BlueprintKind<E>>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind: kind.into(),
        }
    }

    pub fn text(key: &str, label: &str, selector: TextSelector<E>) -> Self {
        Self::new(key, label, TextField::new(selector))
    }

    pub fn numeric(key: &str, label: &str, selector: NumberSelector<E>) -> Self {
        Self::new(key, label, NumericField::new(selector))
    }

    pub fn numeric_range(key: &str, label: &str, selector: NumericRangeSelector<E>) -> Self {
        Self::new(key, label, NumericRangeField::new(selector))
    }

    pub fn date(key: &str, label: &str, selector: DateSelector<E>) -> Self {
        Self::new(key, label, DateField::new(selector))
    }

    pub fn date_range(key: &str, label: &str, selector: DateRangeSelector<E>) -> Self {
        Self::new(key, label, DateRangeField::new(selector))
    }

    /// Single-valued categorical field.
    pub fn single_choice(key: &str, label: &str, selector: TextSelector<E>) -> Self {
        Self::new(key, label, CategoricalField::single(selector))
    }

    /// List-valued categorical field.
    pub fn multi_choice(key: &str, label: &str, selector: ListSelector<E>) -> Self {
        Self::new(key, label, CategoricalField::multi(selector))
    }

    pub fn membership(
        key: &str,
        label: &str,
        category: &str,
        source: Arc<dyn MembershipSource>,
        selector: TextSelector<E>,
    ) -> Self {
        Self::new(key, label, MembershipField::new(category, source, selector))
    }

    pub fn period(
        key: &str,
        label: &str,
        periods: Arc<[Period]>,
        selector: DateRangeSelector<E>,
    ) -> Self {
        Self::new(key, label, PeriodField::new(periods, selector))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &BlueprintKind<E> {
        &self.kind
    }

    pub fn category(&self) -> Category {
        match &self.kind {
            BlueprintKind::Text(_) => Category::Text,
            BlueprintKind::Numeric(_) => Category::Numeric,
            BlueprintKind::NumericRange(_) => Category::NumericRange,
            BlueprintKind::Date(_) => Category::Date,
            BlueprintKind::DateRange(_) => Category::DateRange,
            BlueprintKind::Categorical(_) => Category::Categorical,
            BlueprintKind::Membership(_) => Category::Membership,
            BlueprintKind::Period(_) => Category::Period,
        }
    }

    /// Wire names of the accepted relations, in picker order.
    pub fn valid_relations(&self) -> Vec<&'static str> {
        match &self.kind {
            BlueprintKind::Text(f) => f.relations.names(),
            BlueprintKind::Numeric(f) => f.relations.names(),
            BlueprintKind::NumericRange(f) => f.relations.names(),
            BlueprintKind::Date(f) => f.relations.names(),
            BlueprintKind::DateRange(f) => f.relations.names(),
            BlueprintKind::Categorical(f) => f.relations.names(),
            BlueprintKind::Membership(f) => f.relations.names(),
            BlueprintKind::Period(f) => f.relations.names(),
        }
    }

    pub fn default_relation(&self) -> &'static str {
        match &self.kind {
            BlueprintKind::Text(f) => f.relations.default_relation().as_str(),
            BlueprintKind::Numeric(f) => f.relations.default_relation().as_str(),
            BlueprintKind::NumericRange(f) => f.relations.default_relation().as_str(),
            BlueprintKind::Date(f) => f.relations.default_relation().as_str(),
            BlueprintKind::DateRange(f) => f.relations.default_relation().as_str(),
            BlueprintKind::Categorical(f) => f.relations.default_relation().as_str(),
            BlueprintKind::Membership(f) => f.relations.default_relation().as_str(),
            BlueprintKind::Period(f) => f.relations.default_relation().as_str(),
        }
    }

    pub fn is_valid_relation(&self, relation: &str) -> bool {
        match &self.kind {
            BlueprintKind::Text(f) => f.relations.contains_name(relation),
            BlueprintKind::Numeric(f) => f.relations.contains_name(relation),
            BlueprintKind::NumericRange(f) => f.relations.contains_name(relation),
            BlueprintKind::Date(f) => f.relations.contains_name(relation),
            BlueprintKind::DateRange(f) => f.relations.contains_name(relation),
            BlueprintKind::Categorical(f) => f.relations.contains_name(relation),
            BlueprintKind::Membership(f) => f.relations.contains_name(relation),
            BlueprintKind::Period(f) => f.relations.contains_name(relation),
        }
    }

    /// Whether `relation` is legal for this field and takes no value.
    pub fn is_nullary(&self, relation: &str) -> bool {
        match &self.kind {
            BlueprintKind::Categorical(f) => f
                .relations
                .relations()
                .iter()
                .any(|r| r.as_str() == relation && r.is_nullary()),
            _ => false,
        }
    }

    /// The allowed values of a categorical field, if it restricts them.
    pub fn valid_values(&self) -> Option<&[String]> {
        match &self.kind {
            BlueprintKind::Categorical(f) => f.valid_values.as_deref(),
            _ => None,
        }
    }

    /// Set identifiers a membership field can currently refer to.
    pub fn available_sets(&self) -> Vec<String> {
        match &self.kind {
            BlueprintKind::Membership(f) => f.source.available_sets(&f.category),
            _ => Vec::new(),
        }
    }

    /// Periods a period field can refer to.
    pub fn periods(&self) -> &[Period] {
        match &self.kind {
            BlueprintKind::Period(f) => &f.periods,
            _ => &[],
        }
    }

    /// Validate `(relation, value)` and build the rule.
    ///
    /// `value` must be `None` exactly when the relation is nullary.
    pub fn create_rule(
        &self,
        relation: &str,
        value: Option<FilterValue>,
    ) -> Result<Rule<E>, FilterError> {
        let field = self.key.as_str();
        let rule = match &self.kind {
            BlueprintKind::Text(f) => f.create_rule(field, relation, value),
            BlueprintKind::Numeric(f) => f.create_rule(field, relation, value),
            BlueprintKind::NumericRange(f) => f.create_rule(field, relation, value),
            BlueprintKind::Date(f) => f.create_rule(field, relation, value),
            BlueprintKind::DateRange(f) => f.create_rule(field, relation, value),
            BlueprintKind::Categorical(f) => f.create_rule(field, relation, value),
            BlueprintKind::Membership(f) => f.create_rule(field, relation, value),
            BlueprintKind::Period(f) => f.create_rule(field, relation, value),
        }?;

        debug!("Created {} rule: {}", self.category(), rule.describe());
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{DateRange, NumericRange};
    use crate::rule::{CategoricalRelation, TextRelation};
    use crate::source::MembershipSets;
    use assert_matches::assert_matches;
    use chrono::{DateTime, TimeZone, Utc};

    #[derive(Debug)]
    struct Offering {
        code: String,
        credits: NumericRange,
        start: DateTime<Utc>,
        level: String,
        tags: Vec<String>,
    }

    fn code(o: &Offering) -> &str {
        &o.code
    }

    fn credits(o: &Offering) -> NumericRange {
        o.credits
    }

    fn min_credits(o: &Offering) -> f64 {
        o.credits.min
    }

    fn start(o: &Offering) -> DateTime<Utc> {
        o.start
    }

    fn span(o: &Offering) -> DateRange {
        DateRange::new(o.start, o.start)
    }

    fn level(o: &Offering) -> &str {
        &o.level
    }

    fn tags(o: &Offering) -> &[String] {
        &o.tags
    }

    fn offering() -> Offering {
        Offering {
            code: "CS-A1110".to_string(),
            credits: NumericRange::point(5.0),
            start: Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
            level: "basic-studies".to_string(),
            tags: Vec::new(),
        }
    }

    fn date(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_invalid_relation_lists_valid_ones() {
        let blueprint = Blueprint::new(
            "code",
            "Code",
            TextField::new(code).relations(&[TextRelation::Equals], TextRelation::Contains),
        );
        let error = blueprint.create_rule("matches", Some("CS".into())).unwrap_err();
        assert_eq!(
            error,
            FilterError::InvalidRelation {
                field: "code".to_string(),
                relation: "matches".to_string(),
                valid: vec!["contains".to_string(), "equals".to_string()],
            }
        );
    }

    #[test]
    fn test_missing_and_misshaped_values() {
        let blueprint = Blueprint::text("code", "Code", code);
        assert_matches!(
            blueprint.create_rule("equals", None),
            Err(FilterError::MissingValue { .. })
        );
        assert_matches!(
            blueprint.create_rule("equals", Some(FilterValue::Number(5.0))),
            Err(FilterError::InvalidValue { expected, found, .. })
                if expected == "text" && found == "number"
        );
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let blueprint = Blueprint::text("code", "Code", code);
        assert_matches!(
            blueprint.create_rule("matches", Some("CS-(".into())),
            Err(FilterError::InvalidPattern { .. })
        );
    }

    #[test]
    fn test_range_relations_need_ranges() {
        let blueprint = Blueprint::numeric_range("credits", "Credits", credits);
        assert_matches!(
            blueprint.create_rule("overlaps", Some(5.0.into())),
            Err(FilterError::InvalidValue { .. })
        );
        assert_matches!(
            blueprint.create_rule("overlaps", Some(NumericRange::new(6.0, 3.0).into())),
            Err(FilterError::MalformedRange { .. })
        );
        assert_matches!(
            blueprint.create_rule("minEquals", Some(NumericRange::new(3.0, 6.0).into())),
            Err(FilterError::InvalidValue { .. })
        );

        let rule = blueprint.create_rule("minEquals", Some(5.0.into())).unwrap();
        assert!(rule.evaluate(&offering()));
        assert_eq!(rule.describe(), "credits min equals 5");
    }

    #[test]
    fn test_numeric_rejects_non_finite() {
        let blueprint = Blueprint::numeric("minCredits", "Minimum credits", min_credits);
        assert_matches!(
            blueprint.create_rule("equals", Some(f64::NAN.into())),
            Err(FilterError::InvalidValue { .. })
        );
        assert_matches!(
            blueprint.create_rule(
                "between",
                Some(NumericRange::new(f64::NEG_INFINITY, 3.0).into())
            ),
            Err(FilterError::MalformedRange { .. })
        );
    }

    #[test]
    fn test_date_accepts_text_dates() {
        let blueprint = Blueprint::date("startDate", "Start date", start);
        let rule = blueprint.create_rule("onOrAfter", Some("2025-09-01".into())).unwrap();
        assert!(rule.evaluate(&offering()));
        assert_matches!(
            blueprint.create_rule("onOrAfter", Some("autumn".into())),
            Err(FilterError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_date_between() {
        let blueprint = Blueprint::date("startDate", "Start date", start);
        let autumn = DateRange::new(date(9, 1), date(12, 15));
        let rule = blueprint.create_rule("between", Some(autumn.into())).unwrap();
        assert!(rule.evaluate(&offering()));
        assert_matches!(
            blueprint.create_rule("between", Some(DateRange::new(date(12, 15), date(9, 1)).into())),
            Err(FilterError::MalformedRange { .. })
        );
    }

    #[test]
    fn test_nullary_relations_take_no_value() {
        let blueprint = Blueprint::multi_choice("tags", "Tags", tags);
        assert!(blueprint.is_nullary("isEmpty"));
        assert!(!blueprint.is_nullary("includes"));
        assert!(blueprint.create_rule("isEmpty", None).is_ok());
        assert_matches!(
            blueprint.create_rule("isEmpty", Some(FilterValue::List(vec![]))),
            Err(FilterError::UnexpectedValue { .. })
        );
        assert_matches!(
            blueprint.create_rule("includes", None),
            Err(FilterError::MissingValue { .. })
        );
    }

    #[test]
    fn test_valid_values_are_enforced() {
        let blueprint = Blueprint::new(
            "level",
            "Level",
            CategoricalField::single(level).valid_values(&["basic-studies", "advanced-studies"]),
        );
        assert_eq!(blueprint.valid_values().map(|v| v.len()), Some(2));
        assert!(blueprint.create_rule("equals", Some("Basic-Studies".into())).is_ok());
        assert_matches!(
            blueprint.create_rule("isOneOf", Some((&["basic-studies", "phd"][..]).into())),
            Err(FilterError::UnknownValue { value, .. }) if value == "phd"
        );
    }

    #[test]
    fn test_single_field_rejects_list_relations() {
        let single = Blueprint::single_choice("level", "Level", level);
        assert_matches!(
            single.create_rule("includes", Some("x".into())),
            Err(FilterError::InvalidRelation { .. })
        );

        let widened = Blueprint::new(
            "level",
            "Level",
            CategoricalField::single(level)
                .relations(CategoricalRelation::ALL, CategoricalRelation::Equals),
        );
        assert_matches!(
            widened.create_rule("includes", Some("x".into())),
            Err(FilterError::ShapeMismatch { .. })
        );
    }

    #[test]
    fn test_membership_identifier_must_exist() {
        let sets = Arc::new(MembershipSets::new());
        sets.insert_set("major", "DSD24", ["CS-A1110"]);
        let blueprint = Blueprint::membership("major", "Major", "major", sets, code);

        assert_eq!(blueprint.available_sets(), vec!["DSD24"]);
        assert_matches!(
            blueprint.create_rule("isMemberOf", Some("NOPE".into())),
            Err(FilterError::UnknownIdentifier { identifier, .. }) if identifier == "NOPE"
        );
        let rule = blueprint.create_rule("isMemberOf", Some("DSD24".into())).unwrap();
        assert!(rule.evaluate(&offering()));
    }

    #[test]
    fn test_period_ids_must_resolve() {
        let periods: Arc<[Period]> = Arc::from(vec![Period::new(
            "2025-I",
            "Period I",
            "2025-26",
            date(9, 1),
            date(10, 20),
        )]);
        let blueprint = Blueprint::period("period", "Period", periods, span);

        assert_eq!(blueprint.periods().len(), 1);
        assert_matches!(
            blueprint.create_rule("overlaps", Some(vec!["2025-IX".to_string()].into())),
            Err(FilterError::UnknownPeriod { period_id, .. }) if period_id == "2025-IX"
        );
        assert_matches!(
            blueprint.create_rule("overlaps", Some(FilterValue::List(vec![]))),
            Err(FilterError::InvalidValue { .. })
        );
        let rule = blueprint
            .create_rule("overlaps", Some(vec!["2025-I".to_string()].into()))
            .unwrap();
        assert!(rule.evaluate(&offering()));
    }

    #[test]
    fn test_relation_set_keeps_default() {
        let set = RelationSet::of(&[TextRelation::Equals], TextRelation::StartsWith);
        assert_eq!(set.names(), vec!["startsWith", "equals"]);
        assert_eq!(set.default_relation(), TextRelation::StartsWith);
    }
}
