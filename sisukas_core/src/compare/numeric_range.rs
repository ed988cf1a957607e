//! Numeric interval comparisons
//!
//! A range always has a `min`. A missing `max` means the range is the single point
//! `min`, never that it is unbounded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A closed numeric interval such as a course's credit span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// A range covering exactly one value.
    pub fn point(value: f64) -> Self {
        Self { min: value, max: None }
    }

    /// The upper bound, falling back to `min` when no `max` was given.
    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(self.min)
    }

    pub fn span(&self) -> f64 {
        self.upper() - self.min
    }

    /// Both bounds are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.upper().is_finite() && self.min <= self.upper()
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.upper() == self.min {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.upper())
        }
    }
}

pub fn contains_number(range: &NumericRange, value: f64) -> bool {
    range.min <= value && value <= range.upper()
}

pub fn overlaps(a: &NumericRange, b: &NumericRange) -> bool {
    a.min <= b.upper() && b.min <= a.upper()
}

/// `outer` fully encloses `inner`.
pub fn contains(outer: &NumericRange, inner: &NumericRange) -> bool {
    outer.min <= inner.min && inner.upper() <= outer.upper()
}

pub fn equals(a: &NumericRange, b: &NumericRange) -> bool {
    a.min == b.min && a.upper() == b.upper()
}

pub fn min_at_least(range: &NumericRange, value: f64) -> bool {
    range.min >= value
}

pub fn min_at_most(range: &NumericRange, value: f64) -> bool {
    range.min <= value
}

pub fn min_equals(range: &NumericRange, value: f64) -> bool {
    range.min == value
}

pub fn max_at_least(range: &NumericRange, value: f64) -> bool {
    range.upper() >= value
}

pub fn max_at_most(range: &NumericRange, value: f64) -> bool {
    range.upper() <= value
}

pub fn max_equals(range: &NumericRange, value: f64) -> bool {
    range.upper() == value
}

pub fn span_at_least(range: &NumericRange, value: f64) -> bool {
    range.span() >= value
}

pub fn span_at_most(range: &NumericRange, value: f64) -> bool {
    range.span() <= value
}

pub fn span_equals(range: &NumericRange, value: f64) -> bool {
    range.span() == value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_range_defaults_max_to_min() {
        let range = NumericRange::point(5.0);
        assert!(contains_number(&range, 5.0));
        assert!(!contains_number(&range, 6.0));
        assert!(span_equals(&range, 0.0));
        assert!(max_equals(&range, 5.0));
    }

    #[test]
    fn test_point_range_deserializes_without_max() {
        let range: NumericRange = serde_json::from_str(r#"{"min": 5}"#).unwrap();
        assert_eq!(range, NumericRange::point(5.0));
        assert_eq!(range.upper(), 5.0);
    }

    #[test]
    fn test_contains_number_inclusive_bounds() {
        let range = NumericRange::new(3.0, 5.0);
        assert!(contains_number(&range, 3.0));
        assert!(contains_number(&range, 5.0));
        assert!(!contains_number(&range, 2.9));
    }

    #[test]
    fn test_overlaps() {
        let a = NumericRange::new(1.0, 3.0);
        assert!(overlaps(&a, &NumericRange::new(3.0, 6.0)));
        assert!(overlaps(&a, &NumericRange::point(2.0)));
        assert!(!overlaps(&a, &NumericRange::new(4.0, 6.0)));
    }

    #[test]
    fn test_contains_and_equals() {
        let outer = NumericRange::new(1.0, 10.0);
        assert!(contains(&outer, &NumericRange::new(2.0, 5.0)));
        assert!(!contains(&outer, &NumericRange::new(2.0, 11.0)));
        assert!(equals(&NumericRange::point(5.0), &NumericRange::new(5.0, 5.0)));
    }

    #[test]
    fn test_boundary_family() {
        let range = NumericRange::new(3.0, 6.0);
        assert!(min_at_least(&range, 3.0));
        assert!(!min_at_least(&range, 4.0));
        assert!(min_at_most(&range, 3.0));
        assert!(max_at_least(&range, 6.0));
        assert!(max_at_most(&range, 6.0));
        assert!(!max_at_most(&range, 5.0));
        assert!(span_at_least(&range, 3.0));
        assert!(span_at_most(&range, 3.0));
        assert!(!span_equals(&range, 2.0));
    }

    #[test]
    fn test_validity() {
        assert!(NumericRange::new(1.0, 2.0).is_valid());
        assert!(!NumericRange::new(3.0, 2.0).is_valid());
        assert!(!NumericRange::point(f64::NAN).is_valid());
        assert!(!NumericRange::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(NumericRange::point(5.0).to_string(), "5");
        assert_eq!(NumericRange::new(3.0, 5.0).to_string(), "3-5");
    }
}
