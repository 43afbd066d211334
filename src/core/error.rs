//! Error types for almanac-map
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for almanac-map operations
#[derive(Debug, Error)]
pub enum AlmanacMapError {
    /// Almanac text parsing errors
    #[error("Almanac parse error: {0}")]
    Parse(#[from] AlmanacParseError),

    /// Interval pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single rule is rejected
///
/// Rules are never fatal: the almanac parser skips a rejected rule line and
/// counts it on the owning table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Line does not hold exactly three fields
    #[error("Expected 3 fields, got {0}")]
    FieldCount(usize),

    /// A field is not a 64-bit integer
    #[error("Invalid integer '{0}'")]
    InvalidNumber(String),

    /// Length is zero or negative
    #[error("Rule length must be positive, got {0}")]
    NonPositiveLength(i64),

    /// Source or destination end does not fit in i64
    #[error("Rule end overflows: start {start} + length {length}")]
    Overflow { start: i64, length: i64 },
}

/// Errors raised by interval construction and pipeline aggregates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// `lowest_start` called on an empty interval set
    #[error("Cannot take the lowest start of an empty interval set")]
    EmptyIntervalSet,

    /// Seed ranges were given as an odd number of integers
    #[error("Seed ranges need (start, length) pairs, got {0} values")]
    UnpairedSeed(usize),

    /// Negative length or an end past i64::MAX
    #[error("Invalid interval: start {start}, length {length}")]
    InvalidInterval { start: i64, length: i64 },

    /// Thread pool could not be created
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),
}

/// Specific kinds of almanac parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlmanacParseErrorKind {
    /// First non-empty line is not a `seeds:` line
    MissingSeeds,
    /// A seed value is not an integer
    InvalidSeed,
    /// A rule line appeared before any `... map:` header
    MissingMapHeader,
    /// I/O error during reading
    IoError,
    /// File not found
    FileNotFound,
}

/// Errors that can occur during almanac parsing
#[derive(Debug)]
pub struct AlmanacParseError {
    /// Human-readable error message
    pub message: String,
    /// Line number where the error occurred (1-based)
    pub line_number: Option<usize>,
    /// The kind of error that occurred
    pub kind: AlmanacParseErrorKind,
}

impl std::fmt::Display for AlmanacParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line_number {
            Some(line) => write!(f, "Line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AlmanacParseError {}

impl AlmanacParseError {
    /// Create an error with line number and kind
    pub fn with_line(message: impl Into<String>, line_number: usize, kind: AlmanacParseErrorKind) -> Self {
        Self {
            message: message.into(),
            line_number: Some(line_number),
            kind,
        }
    }

    /// Create a missing seeds error
    pub fn missing_seeds(line_number: usize, content: &str) -> Self {
        Self::with_line(
            format!(
                "Expected 'seeds:' line, got '{}'",
                content.chars().take(100).collect::<String>()
            ),
            line_number,
            AlmanacParseErrorKind::MissingSeeds,
        )
    }

    /// Create an invalid seed error
    pub fn invalid_seed(value: &str, line_number: usize) -> Self {
        Self::with_line(
            format!("Invalid seed value '{}': expected an integer", value),
            line_number,
            AlmanacParseErrorKind::InvalidSeed,
        )
    }

    /// Create a missing map header error
    pub fn missing_map_header(line_number: usize) -> Self {
        Self::with_line(
            "Rule line found before any map header",
            line_number,
            AlmanacParseErrorKind::MissingMapHeader,
        )
    }

    /// Create a file not found error
    pub fn file_not_found(path: PathBuf) -> Self {
        Self {
            message: format!("Almanac file not found: {}", path.display()),
            line_number: None,
            kind: AlmanacParseErrorKind::FileNotFound,
        }
    }

    /// Check if this is a specific kind of error
    pub fn is_kind(&self, kind: AlmanacParseErrorKind) -> bool {
        self.kind == kind
    }
}

impl From<std::io::Error> for AlmanacParseError {
    fn from(e: std::io::Error) -> Self {
        Self {
            message: format!("IO error: {}", e),
            line_number: None,
            kind: AlmanacParseErrorKind::IoError,
        }
    }
}

/// Result type alias for almanac-map operations
pub type Result<T> = std::result::Result<T, AlmanacMapError>;

/// Result type alias for almanac parsing
pub type ParseResult<T> = std::result::Result<T, AlmanacParseError>;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
