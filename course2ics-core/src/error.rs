//! Error types for course2ics.

use thiserror::Error;

/// Errors that can occur while turning course rows into calendar files.
#[derive(Error, Debug)]
pub enum Course2IcsError {
    #[error("Row is missing required field(s): {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("Invalid day code '{0}'. Expected one of U, Su, M, T, W, R, Th, F, S, Sa")]
    InvalidDayCode(String),

    #[error("Invalid time range '{0}'. Expected HH:MM - HH:MM (24 hours)")]
    InvalidTimeFormat(String),

    #[error("Malformed name '{0}'. Expected the format Last, First")]
    MalformedName(String),

    #[error("No day matching '{0}' found after {1}")]
    UnresolvableOccurrence(String, chrono::NaiveDate),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No rows could be parsed from {0}")]
    EmptyInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for course2ics operations.
pub type Course2IcsResult<T> = Result<T, Course2IcsError>;
