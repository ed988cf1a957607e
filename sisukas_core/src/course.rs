//! The course entity the catalog filters run over

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::compare::{DateRange, NumericRange};
use crate::value::deserialize_date;

/// A course realisation as produced by the catalog loader.
///
/// Field names on the wire follow the catalog export (`organizationName`,
/// `enrolmentStartDate`, `languageOfInstructionCodes`, ...). Dates may be RFC 3339
/// timestamps or bare `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(rename = "organizationName", default)]
    pub organization: String,
    pub credits: NumericRange,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "enrolmentStartDate", deserialize_with = "deserialize_date")]
    pub enrollment_start: DateTime<Utc>,
    #[serde(rename = "enrolmentEndDate", deserialize_with = "deserialize_date")]
    pub enrollment_end: DateTime<Utc>,
    #[serde(default)]
    pub level: String,
    #[serde(rename = "type", default)]
    pub format: String,
    #[serde(rename = "languageOfInstructionCodes", default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub teachers: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Course {
    /// A course with the given code and name. Everything else starts empty, with
    /// zero credits and all dates at the Unix epoch.
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            id: code.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            organization: String::new(),
            credits: NumericRange::point(0.0),
            start_date: DateTime::default(),
            end_date: DateTime::default(),
            enrollment_start: DateTime::default(),
            enrollment_end: DateTime::default(),
            level: String::new(),
            format: String::new(),
            languages: Vec::new(),
            teachers: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_organization(mut self, organization: &str) -> Self {
        self.organization = organization.to_string();
        self
    }

    pub fn with_credits(mut self, credits: NumericRange) -> Self {
        self.credits = credits;
        self
    }

    pub fn with_dates(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_enrollment(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.enrollment_start = start;
        self.enrollment_end = end;
        self
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn with_languages(mut self, languages: &[&str]) -> Self {
        self.languages = to_strings(languages);
        self
    }

    pub fn with_teachers(mut self, teachers: &[&str]) -> Self {
        self.teachers = to_strings(teachers);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = to_strings(tags);
        self
    }

    /// First to last day of teaching.
    pub fn course_span(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn enrollment_span(&self) -> DateRange {
        DateRange::new(self.enrollment_start, self.enrollment_end)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
