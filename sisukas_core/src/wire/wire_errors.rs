use std::fmt;

/// Errors reading or writing the filters wire format.
#[derive(Debug, Clone, PartialEq)]
pub enum WireError {
    /// The payload is not valid JSON of the expected shape
    Malformed(String),
    /// A share id that is not 16 to 64 lowercase hex characters
    InvalidHashId(String),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::Malformed(message) => write!(f, "Malformed filter payload: {}", message),
            WireError::InvalidHashId(id) => write!(
                f,
                "Invalid filter id '{}': expected 16 to 64 lowercase hex characters",
                id
            ),
        }
    }
}

impl std::error::Error for WireError {}

impl From<serde_json::Error> for WireError {
    fn from(error: serde_json::Error) -> Self {
        WireError::Malformed(error.to_string())
    }
}
