//! Values supplied to blueprints, builders and the wire format

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::compare::{DateRange, NumericRange};

/// A value a rule is built from.
///
/// Encoded natively on the wire: numbers stay numbers, lists stay arrays and ranges
/// stay objects. Single dates are strings, so a [`FilterValue::Date`] comes back as
/// [`FilterValue::Text`] after a round trip and the date blueprint accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
    NumericRange(NumericRange),
    DateRange(DateRange),
    Date(DateTime<Utc>),
}

impl FilterValue {
    /// Returns the type name of this value for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FilterValue::Number(_) => "number",
            FilterValue::Text(_) => "text",
            FilterValue::List(_) => "list",
            FilterValue::NumericRange(_) => "numeric range",
            FilterValue::DateRange(_) => "date range",
            FilterValue::Date(_) => "date",
        }
    }
}

/// Prose form used in rule descriptions. Dates are shown as calendar days.
impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Number(n) => write!(f, "{}", n),
            FilterValue::Text(text) => f.write_str(text),
            FilterValue::List(items) => f.write_str(&items.join(", ")),
            FilterValue::NumericRange(range) => write!(f, "{}", range),
            FilterValue::DateRange(range) => write!(f, "{}", range),
            FilterValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        FilterValue::List(values)
    }
}

impl From<&[&str]> for FilterValue {
    fn from(values: &[&str]) -> Self {
        FilterValue::List(values.iter().map(|v| v.to_string()).collect())
    }
}

impl From<NumericRange> for FilterValue {
    fn from(range: NumericRange) -> Self {
        FilterValue::NumericRange(range)
    }
}

impl From<DateRange> for FilterValue {
    fn from(range: DateRange) -> Self {
        FilterValue::DateRange(range)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(date: DateTime<Utc>) -> Self {
        FilterValue::Date(date)
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as UTC midnight).
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Serde helper for catalog dates that may be timestamps or bare dates.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_only() {
        assert_eq!(
            parse_date("2025-09-01"),
            Some(Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        assert_eq!(
            parse_date("2025-09-01T10:00:00+03:00"),
            Some(Utc.with_ymd_and_hms(2025, 9, 1, 7, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_invalid_date() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn test_untagged_decoding_picks_native_shapes() {
        let number: FilterValue = serde_json::from_str("5").unwrap();
        assert_eq!(number, FilterValue::Number(5.0));

        let text: FilterValue = serde_json::from_str(r#""CS-""#).unwrap();
        assert_eq!(text, FilterValue::Text("CS-".to_string()));

        let list: FilterValue = serde_json::from_str(r#"["en","fi"]"#).unwrap();
        assert_eq!(list, FilterValue::List(vec!["en".to_string(), "fi".to_string()]));

        let credits: FilterValue = serde_json::from_str(r#"{"min":3,"max":5}"#).unwrap();
        assert_eq!(credits, FilterValue::NumericRange(NumericRange::new(3.0, 5.0)));

        let dates: FilterValue =
            serde_json::from_str(r#"{"start":"2025-09-01T00:00:00Z","end":"2025-12-15T00:00:00Z"}"#)
                .unwrap();
        assert!(matches!(dates, FilterValue::DateRange(_)));
    }

    #[test]
    fn test_date_serializes_as_string() {
        let date = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_string(&FilterValue::Date(date)).unwrap();
        assert_eq!(json, r#""2025-09-01T00:00:00Z""#);
    }

    #[test]
    fn test_display_for_descriptions() {
        assert_eq!(FilterValue::Number(5.0).to_string(), "5");
        assert_eq!(FilterValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FilterValue::from(&["en", "fi"][..]).to_string(), "en, fi");
        let date = Utc.with_ymd_and_hms(2025, 9, 1, 12, 30, 0).unwrap();
        assert_eq!(FilterValue::Date(date).to_string(), "2025-09-01");
    }
}
