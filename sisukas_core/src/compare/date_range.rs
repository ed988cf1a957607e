//! Date interval comparisons. Both bounds are inclusive.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounds deserialize from RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(deserialize_with = "crate::value::deserialize_date")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "crate::value::deserialize_date")]
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

pub fn contains_date(range: &DateRange, date: &DateTime<Utc>) -> bool {
    range.start <= *date && *date <= range.end
}

pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    a.start <= b.end && b.start <= a.end
}

/// `outer` fully encloses `inner`.
pub fn contains(outer: &DateRange, inner: &DateRange) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// `inner` lies entirely inside `outer`.
pub fn is_within_range(inner: &DateRange, outer: &DateRange) -> bool {
    contains(outer, inner)
}

pub fn equals(a: &DateRange, b: &DateRange) -> bool {
    a.start == b.start && a.end == b.end
}

/// `a` ends before `b` starts.
pub fn is_completely_before(a: &DateRange, b: &DateRange) -> bool {
    a.end < b.start
}

/// `a` starts after `b` ends.
pub fn is_completely_after(a: &DateRange, b: &DateRange) -> bool {
    a.start > b.end
}

pub fn duration_in_milliseconds(range: &DateRange) -> i64 {
    (range.end - range.start).num_milliseconds()
}

pub fn duration_in_hours(range: &DateRange) -> f64 {
    duration_in_milliseconds(range) as f64 / 3_600_000.0
}

pub fn duration_in_days(range: &DateRange) -> f64 {
    duration_in_milliseconds(range) as f64 / 86_400_000.0
}
