use chrono::{DateTime, Utc};

use crate::FilterError;
use crate::compare::{DateRange, NumericRange};
use crate::rule::Relation;
use crate::value::{FilterValue, parse_date};

/// Shape checks for the value handed to a blueprint, reporting errors against one
/// `(field, relation)` pair.
pub(super) struct ValueCheck<'a> {
    field: &'a str,
    relation: &'static str,
}

impl<'a> ValueCheck<'a> {
    pub(super) fn new<R: Relation>(field: &'a str, relation: R) -> Self {
        Self {
            field,
            relation: relation.as_str(),
        }
    }

    pub(super) fn required(&self, value: Option<FilterValue>) -> Result<FilterValue, FilterError> {
        value.ok_or_else(|| FilterError::MissingValue {
            field: self.field.to_string(),
            relation: self.relation.to_string(),
        })
    }

    pub(super) fn absent(&self, value: Option<FilterValue>) -> Result<(), FilterError> {
        match value {
            None => Ok(()),
            Some(_) => Err(FilterError::UnexpectedValue {
                field: self.field.to_string(),
                relation: self.relation.to_string(),
            }),
        }
    }

    pub(super) fn text(&self, value: FilterValue) -> Result<String, FilterError> {
        match value {
            FilterValue::Text(text) => Ok(text),
            other => Err(self.mismatch("text", other.type_name())),
        }
    }

    pub(super) fn number(&self, value: FilterValue) -> Result<f64, FilterError> {
        match value {
            FilterValue::Number(n) if n.is_finite() => Ok(n),
            FilterValue::Number(_) => Err(self.mismatch("finite number", "non-finite number")),
            other => Err(self.mismatch("number", other.type_name())),
        }
    }

    pub(super) fn numeric_range(&self, value: FilterValue) -> Result<NumericRange, FilterError> {
        let range = match value {
            FilterValue::NumericRange(range) => range,
            other => return Err(self.mismatch("numeric range", other.type_name())),
        };

        let finite = range.min.is_finite() && range.max.is_none_or(f64::is_finite);
        if !finite {
            return Err(self.malformed("range bounds must be finite".to_string()));
        }
        if !range.is_valid() {
            return Err(self.malformed(format!(
                "min {} is greater than max {}",
                range.min,
                range.upper()
            )));
        }
        Ok(range)
    }

    /// A date, or text holding an RFC 3339 timestamp or `YYYY-MM-DD` date.
    pub(super) fn date(&self, value: FilterValue) -> Result<DateTime<Utc>, FilterError> {
        match value {
            FilterValue::Date(date) => Ok(date),
            FilterValue::Text(text) => {
                parse_date(&text).ok_or_else(|| self.mismatch("date", &format!("text '{}'", text)))
            }
            other => Err(self.mismatch("date", other.type_name())),
        }
    }

    pub(super) fn date_range(&self, value: FilterValue) -> Result<DateRange, FilterError> {
        match value {
            FilterValue::DateRange(range) if range.is_valid() => Ok(range),
            FilterValue::DateRange(range) => Err(self.malformed(format!(
                "start {} is after end {}",
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d")
            ))),
            other => Err(self.mismatch("date range", other.type_name())),
        }
    }

    pub(super) fn list(&self, value: FilterValue) -> Result<Vec<String>, FilterError> {
        match value {
            FilterValue::List(items) if !items.is_empty() => Ok(items),
            FilterValue::List(_) => Err(self.mismatch("non-empty list", "empty list")),
            other => Err(self.mismatch("list", other.type_name())),
        }
    }

    fn mismatch(&self, expected: &str, found: &str) -> FilterError {
        FilterError::InvalidValue {
            field: self.field.to_string(),
            relation: self.relation.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    fn malformed(&self, message: String) -> FilterError {
        FilterError::MalformedRange {
            field: self.field.to_string(),
            message,
        }
    }
}
