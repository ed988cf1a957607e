//! Text rules

use std::borrow::Cow;

use log::debug;
use regex::{Regex, RegexBuilder};

use super::{Relation, TextSelector, humanize, relation_enum};
use crate::FilterError;
use crate::value::FilterValue;
use crate::wire::SerializedRule;

relation_enum! {
    /// Relations for free-text fields such as code or name
    TextRelation {
        Equals => "equals",
        NotEquals => "notEquals",
        Contains => "contains",
        NotContains => "notContains",
        StartsWith => "startsWith",
        EndsWith => "endsWith",
        Matches => "matches",
    }
}

/// A relation paired with what it compares against: the normalized needle, or
/// the compiled pattern for `matches`.
#[derive(Debug, Clone)]
enum TextTest {
    Equals(String),
    NotEquals(String),
    Contains(String),
    NotContains(String),
    StartsWith(String),
    EndsWith(String),
    Matches(Regex),
}

impl TextTest {
    fn relation(&self) -> TextRelation {
        match self {
            TextTest::Equals(_) => TextRelation::Equals,
            TextTest::NotEquals(_) => TextRelation::NotEquals,
            TextTest::Contains(_) => TextRelation::Contains,
            TextTest::NotContains(_) => TextRelation::NotContains,
            TextTest::StartsWith(_) => TextRelation::StartsWith,
            TextTest::EndsWith(_) => TextRelation::EndsWith,
            TextTest::Matches(_) => TextRelation::Matches,
        }
    }
}

/// Matches a text field against a string or regular expression.
///
/// Both sides are normalized the same way before comparing: trimmed unless `trim`
/// is off, lower-cased unless `case_sensitive` is on.
#[derive(Debug, Clone)]
pub struct TextRule<E> {
    pub(crate) field: String,
    value: String,
    test: TextTest,
    case_sensitive: bool,
    trim: bool,
    selector: TextSelector<E>,
}

impl<E> TextRule<E> {
    pub(crate) fn new(
        field: &str,
        relation: TextRelation,
        value: String,
        case_sensitive: bool,
        trim: bool,
        selector: TextSelector<E>,
    ) -> Result<Self, FilterError> {
        let needle = || normalize(&value, case_sensitive, trim).into_owned();
        let test = match relation {
            TextRelation::Equals => TextTest::Equals(needle()),
            TextRelation::NotEquals => TextTest::NotEquals(needle()),
            TextRelation::Contains => TextTest::Contains(needle()),
            TextRelation::NotContains => TextTest::NotContains(needle()),
            TextRelation::StartsWith => TextTest::StartsWith(needle()),
            TextRelation::EndsWith => TextTest::EndsWith(needle()),
            TextRelation::Matches => {
                let source = if trim { value.trim() } else { value.as_str() };
                let regex = RegexBuilder::new(source)
                    .case_insensitive(!case_sensitive)
                    .build()
                    .map_err(|e| FilterError::InvalidPattern {
                        field: field.to_string(),
                        pattern: value.clone(),
                        message: e.to_string(),
                    })?;
                TextTest::Matches(regex)
            }
        };
        debug!("Built text rule: {} {} '{}'", field, relation, value);

        Ok(Self {
            field: field.to_string(),
            value,
            test,
            case_sensitive,
            trim,
            selector,
        })
    }

    pub fn relation(&self) -> TextRelation {
        self.test.relation()
    }

    pub fn evaluate(&self, entity: &E) -> bool {
        let raw = (self.selector)(entity);

        let haystack = || normalize(raw, self.case_sensitive, self.trim);
        match &self.test {
            TextTest::Equals(needle) => haystack() == needle.as_str(),
            TextTest::NotEquals(needle) => haystack() != needle.as_str(),
            TextTest::Contains(needle) => haystack().contains(needle.as_str()),
            TextTest::NotContains(needle) => !haystack().contains(needle.as_str()),
            TextTest::StartsWith(needle) => haystack().starts_with(needle.as_str()),
            TextTest::EndsWith(needle) => haystack().ends_with(needle.as_str()),
            // Case folding is left to the compiled pattern
            TextTest::Matches(pattern) => {
                pattern.is_match(if self.trim { raw.trim() } else { raw })
            }
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} {} \"{}\"",
            self.field,
            humanize(self.relation().as_str()),
            self.value
        )
    }

    pub fn to_record(&self) -> SerializedRule {
        SerializedRule::new(
            &self.field,
            self.relation().as_str(),
            Some(FilterValue::Text(self.value.clone())),
        )
    }
}

fn normalize(value: &str, case_sensitive: bool, trim: bool) -> Cow<'_, str> {
    let value = if trim { value.trim() } else { value };
    if case_sensitive {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.to_lowercase())
    }
}
