//! Categorical rules over single-valued and list-valued fields

use super::{ListSelector, Relation, TextSelector, humanize, relation_enum};
use crate::compare::{MatchOptions, array};
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    /// Relations for categorical fields. The first four apply to single-valued
    /// fields, the rest to list-valued ones.
    CategoricalRelation {
        Equals => "equals",
        NotEquals => "notEquals",
        IsOneOf => "isOneOf",
        IsNotOneOf => "isNotOneOf",
        Includes => "includes",
        NotIncludes => "notIncludes",
        IncludesAny => "includesAny",
        IncludesAll => "includesAll",
        IsEmpty => "isEmpty" (nullary),
        IsNotEmpty => "isNotEmpty" (nullary),
    }
}

impl CategoricalRelation {
    /// The relation reads a list-valued field.
    pub fn needs_list_field(&self) -> bool {
        !matches!(
            self,
            CategoricalRelation::Equals
                | CategoricalRelation::NotEquals
                | CategoricalRelation::IsOneOf
                | CategoricalRelation::IsNotOneOf
        )
    }

    /// The relation compares against several values rather than one.
    pub fn takes_list_value(&self) -> bool {
        matches!(
            self,
            CategoricalRelation::IsOneOf
                | CategoricalRelation::IsNotOneOf
                | CategoricalRelation::IncludesAny
                | CategoricalRelation::IncludesAll
        )
    }
}

/// How a categorical field is read: one value, or a list of values.
#[derive(Debug)]
pub enum CategoricalSelector<E> {
    Single(TextSelector<E>),
    Multi(ListSelector<E>),
}

// Manual impls: fn pointers are Copy whatever `E` is.
impl<E> Clone for CategoricalSelector<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for CategoricalSelector<E> {}

impl<E> CategoricalSelector<E> {
    pub fn is_multi(&self) -> bool {
        matches!(self, CategoricalSelector::Multi(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScalarTest {
    Equals(String),
    NotEquals(String),
    IsOneOf(Vec<String>),
    IsNotOneOf(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ArrayTest {
    Includes(String),
    NotIncludes(String),
    IncludesAny(Vec<String>),
    IncludesAll(Vec<String>),
    IsEmpty,
    IsNotEmpty,
}

/// The field read paired with a test of matching shape, so a list relation can
/// never be applied to a single-valued field.
#[derive(Debug, Clone)]
enum Check<E> {
    Scalar(TextSelector<E>, ScalarTest),
    Array(ListSelector<E>, ArrayTest),
}

#[derive(Debug, Clone)]
pub struct CategoricalRule<E> {
    pub(crate) field: String,
    check: Check<E>,
    options: MatchOptions,
}

impl<E> CategoricalRule<E> {
    pub(crate) fn scalar(
        field: &str,
        selector: TextSelector<E>,
        test: ScalarTest,
        options: MatchOptions,
    ) -> Self {
        Self {
            field: field.to_string(),
            check: Check::Scalar(selector, test),
            options,
        }
    }

    pub(crate) fn array(
        field: &str,
        selector: ListSelector<E>,
        test: ArrayTest,
        options: MatchOptions,
    ) -> Self {
        Self {
            field: field.to_string(),
            check: Check::Array(selector, test),
            options,
        }
    }

    pub fn relation(&self) -> CategoricalRelation {
        match &self.check {
            Check::Scalar(_, test) => match test {
                ScalarTest::Equals(_) => CategoricalRelation::Equals,
                ScalarTest::NotEquals(_) => CategoricalRelation::NotEquals,
                ScalarTest::IsOneOf(_) => CategoricalRelation::IsOneOf,
                ScalarTest::IsNotOneOf(_) => CategoricalRelation::IsNotOneOf,
            },
            Check::Array(_, test) => match test {
                ArrayTest::Includes(_) => CategoricalRelation::Includes,
                ArrayTest::NotIncludes(_) => CategoricalRelation::NotIncludes,
                ArrayTest::IncludesAny(_) => CategoricalRelation::IncludesAny,
                ArrayTest::IncludesAll(_) => CategoricalRelation::IncludesAll,
                ArrayTest::IsEmpty => CategoricalRelation::IsEmpty,
                ArrayTest::IsNotEmpty => CategoricalRelation::IsNotEmpty,
            },
        }
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let options = &self.options;
        match &self.check {
            Check::Scalar(selector, test) => {
                let value = selector(entity);
                match test {
                    ScalarTest::Equals(target) => array::values_match(value, target, options),
                    ScalarTest::NotEquals(target) => !array::values_match(value, target, options),
                    ScalarTest::IsOneOf(targets) => array::includes(targets, value, options),
                    ScalarTest::IsNotOneOf(targets) => array::not_includes(targets, value, options),
                }
            }
            Check::Array(selector, test) => {
                let items = selector(entity);
                match test {
                    ArrayTest::Includes(target) => array::includes(items, target, options),
                    ArrayTest::NotIncludes(target) => array::not_includes(items, target, options),
                    ArrayTest::IncludesAny(targets) => array::includes_any(items, targets, options),
                    ArrayTest::IncludesAll(targets) => array::includes_all(items, targets, options),
                    ArrayTest::IsEmpty => array::is_empty(items),
                    ArrayTest::IsNotEmpty => array::is_not_empty(items),
                }
            }
        }
    }

    fn value(&self) -> Option<FilterValue> {
        let single = |s: &String| Some(FilterValue::Text(s.clone()));
        let many = |v: &Vec<String>| Some(FilterValue::List(v.clone()));
        match &self.check {
            Check::Scalar(_, test) => match test {
                ScalarTest::Equals(s) | ScalarTest::NotEquals(s) => single(s),
                ScalarTest::IsOneOf(v) | ScalarTest::IsNotOneOf(v) => many(v),
            },
            Check::Array(_, test) => match test {
                ArrayTest::Includes(s) | ArrayTest::NotIncludes(s) => single(s),
                ArrayTest::IncludesAny(v) | ArrayTest::IncludesAll(v) => many(v),
                ArrayTest::IsEmpty | ArrayTest::IsNotEmpty => None,
            },
        }
    }

    pub fn describe(&self) -> String {
        let relation = humanize(self.relation().as_str());
        match self.value() {
            Some(FilterValue::Text(s)) => format!("{} {} \"{}\"", self.field, relation, s),
            Some(FilterValue::List(v)) => {
                format!("{} {} [{}]", self.field, relation, v.join(", "))
            }
            _ => format!("{} {}", self.field, relation),
        }
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(&self.field, self.relation().as_str(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offering {
        level: String,
        teachers: Vec<String>,
    }

    fn level(o: &Offering) -> &str {
        &o.level
    }

    fn teachers(o: &Offering) -> &[String] {
        &o.teachers
    }

    fn offering(level: &str, teachers: &[&str]) -> Offering {
        Offering {
            level: level.to_string(),
            teachers: teachers.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_is_one_of() {
        let rule = CategoricalRule::scalar(
            "level",
            level,
            ScalarTest::IsOneOf(strings(&["basic-studies", "advanced-studies"])),
            MatchOptions::default(),
        );
        assert!(rule.evaluate(&offering("basic-studies", &[])));
        assert!(!rule.evaluate(&offering("other-studies", &[])));
        assert_eq!(rule.relation(), CategoricalRelation::IsOneOf);
    }

    #[test]
    fn test_equals_and_not_equals() {
        let equals = CategoricalRule::scalar(
            "level",
            level,
            ScalarTest::Equals("Basic-Studies".to_string()),
            MatchOptions::default(),
        );
        assert!(equals.evaluate(&offering("basic-studies", &[])));

        let not_equals = CategoricalRule::scalar(
            "level",
            level,
            ScalarTest::NotEquals("basic-studies".to_string()),
            MatchOptions::default(),
        );
        assert!(not_equals.evaluate(&offering("advanced-studies", &[])));
        assert!(!not_equals.evaluate(&offering("basic-studies", &[])));
    }

    #[test]
    fn test_partial_teacher_search() {
        let rule = CategoricalRule::array(
            "teachers",
            teachers,
            ArrayTest::Includes("milo".to_string()),
            MatchOptions {
                case_sensitive: false,
                partial: true,
            },
        );
        assert!(rule.evaluate(&offering("", &["Milo Virtanen"])));
        assert!(!rule.evaluate(&offering("", &["Anna Korhonen"])));
    }

    #[test]
    fn test_includes_any_and_all() {
        let any = CategoricalRule::array(
            "teachers",
            teachers,
            ArrayTest::IncludesAny(strings(&["a", "b"])),
            MatchOptions::default(),
        );
        let all = CategoricalRule::array(
            "teachers",
            teachers,
            ArrayTest::IncludesAll(strings(&["a", "b"])),
            MatchOptions::default(),
        );
        let one = offering("", &["a"]);
        let both = offering("", &["b", "a"]);
        assert!(any.evaluate(&one));
        assert!(!all.evaluate(&one));
        assert!(all.evaluate(&both));
    }

    #[test]
    fn test_emptiness() {
        let options = MatchOptions::default();
        let empty = CategoricalRule::array("teachers", teachers, ArrayTest::IsEmpty, options);
        let not_empty =
            CategoricalRule::array("teachers", teachers, ArrayTest::IsNotEmpty, options);
        assert!(empty.evaluate(&offering("", &[])));
        assert!(!not_empty.evaluate(&offering("", &[])));
        assert!(not_empty.evaluate(&offering("", &["x"])));
        assert_eq!(empty.to_record().value, None);
        assert_eq!(empty.describe(), "teachers is empty");
    }

    #[test]
    fn test_describe_list_value() {
        let rule = CategoricalRule::scalar(
            "level",
            level,
            ScalarTest::IsOneOf(strings(&["basic-studies", "advanced-studies"])),
            MatchOptions::default(),
        );
        assert_eq!(
            rule.describe(),
            "level is one of [basic-studies, advanced-studies]"
        );
    }

    #[test]
    fn test_relation_shapes() {
        assert!(!CategoricalRelation::IsOneOf.needs_list_field());
        assert!(CategoricalRelation::IncludesAny.needs_list_field());
        assert!(CategoricalRelation::IsOneOf.takes_list_value());
        assert!(!CategoricalRelation::Includes.takes_list_value());
    }
}
