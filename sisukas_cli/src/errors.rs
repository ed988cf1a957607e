use std::fmt;

/// Failures that end a CLI command. Details are reported through `ui` as they
/// happen, so the variants only classify the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    FileError,
    InputError,
    FilterError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileError => write!(f, "Failed to read an input file"),
            CliError::InputError => write!(f, "Input file has an unexpected format"),
            CliError::FilterError => write!(f, "Filter could not be applied"),
        }
    }
}

impl std::error::Error for CliError {}
