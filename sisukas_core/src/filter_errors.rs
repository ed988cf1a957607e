//! Error types for rule construction

use std::fmt;

/// Errors raised while turning a `(relation, value)` pair into a rule.
///
/// These are construction-time failures only. Evaluating a built rule never fails:
/// malformed entity data simply does not match.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// No blueprint is registered under this key
    UnknownField { field: String },
    /// Two blueprints were registered under the same key
    DuplicateField { field: String },
    /// Relation is not in the field's closed relation set
    InvalidRelation {
        field: String,
        relation: String,
        valid: Vec<String>,
    },
    /// A builder was asked to build before a relation was chosen
    MissingRelation { field: String },
    /// Relation needs a value but none was given
    MissingValue { field: String, relation: String },
    /// Relation takes no value but one was given
    UnexpectedValue { field: String, relation: String },
    /// Value has the wrong shape for the relation
    InvalidValue {
        field: String,
        relation: String,
        expected: String,
        found: String,
    },
    /// Range value is not finite or has its bounds reversed
    MalformedRange { field: String, message: String },
    /// Value is not in the field's allowed values
    UnknownValue {
        field: String,
        value: String,
        valid: Vec<String>,
    },
    /// Regular expression could not be compiled
    InvalidPattern {
        field: String,
        pattern: String,
        message: String,
    },
    /// Relation needs a list field but the field holds a single value, or the reverse
    ShapeMismatch { field: String, relation: String },
    /// No membership set with this identifier exists
    UnknownIdentifier {
        field: String,
        category: String,
        identifier: String,
    },
    /// No period with this id exists
    UnknownPeriod { field: String, period_id: String },
    /// A filter config could not be turned into a rule
    Config { id: u64, error: Box<FilterError> },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownField { field } => {
                write!(f, "No filterable field named '{}'", field)
            }
            FilterError::DuplicateField { field } => {
                write!(f, "Field '{}' is already registered", field)
            }
            FilterError::InvalidRelation {
                field,
                relation,
                valid,
            } => write!(
                f,
                "Cannot use '{}' on field '{}'. Supported: {}",
                relation,
                field,
                valid.join(", ")
            ),
            FilterError::MissingRelation { field } => {
                write!(f, "No relation chosen for field '{}'", field)
            }
            FilterError::MissingValue { field, relation } => {
                write!(f, "'{}' on field '{}' needs a value", relation, field)
            }
            FilterError::UnexpectedValue { field, relation } => {
                write!(f, "'{}' on field '{}' takes no value", relation, field)
            }
            FilterError::InvalidValue {
                field,
                relation,
                expected,
                found,
            } => write!(
                f,
                "'{}' on field '{}' expects a {} value, got {}",
                relation, field, expected, found
            ),
            FilterError::MalformedRange { field, message } => {
                write!(f, "Malformed range for field '{}': {}", field, message)
            }
            FilterError::UnknownValue {
                field,
                value,
                valid,
            } => write!(
                f,
                "'{}' is not a valid value for field '{}'. Valid: {}",
                value,
                field,
                valid.join(", ")
            ),
            FilterError::InvalidPattern {
                field,
                pattern,
                message,
            } => write!(
                f,
                "Pattern '{}' for field '{}' is invalid: {}",
                pattern, field, message
            ),
            FilterError::ShapeMismatch { field, relation } => write!(
                f,
                "'{}' does not fit the shape of field '{}'",
                relation, field
            ),
            FilterError::UnknownIdentifier {
                field,
                category,
                identifier,
            } => write!(
                f,
                "Unknown {} '{}' for field '{}'",
                category, identifier, field
            ),
            FilterError::UnknownPeriod { field, period_id } => {
                write!(f, "Unknown period '{}' for field '{}'", period_id, field)
            }
            FilterError::Config { id, error } => {
                write!(f, "Filter {} is invalid: {}", id, error)
            }
        }
    }
}

impl std::error::Error for FilterError {}
