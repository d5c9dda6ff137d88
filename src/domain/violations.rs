//! Core domain models for naming violations and validation results
//!
//! Architecture: Rich Domain Models - a violation is a value, not an exception
//! - ViolationKind names what went wrong with a single style-sheet file
//! - Violation binds a kind to the file it was found in
//! - ValidationReport is the outcome of a run that completed, accordant or not
//! - GuardError is reserved for runs that could not complete

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What made a style-sheet file violate the naming convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "snake_case")]
pub enum ViolationKind {
    /// File content is not valid style-sheet syntax
    #[serde(rename = "parse_error")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },
    /// More than one qualifying top-level class rule
    TooManyRules { count: usize, selectors: Vec<String> },
    /// Selector (minus leading dot) differs from the file's base name
    FilenameMismatch { selector: String, file_name: String },
    /// Selector is not decomposable under the naming scheme
    InvalidName { selector: String, raw_name: String },
    /// Decomposed identity does not match the directory layout
    StructuralMismatch { selector: String, expected: String },
}

impl ViolationKind {
    /// Stable identifier used by reports and the CLI
    pub fn id(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse_error",
            Self::TooManyRules { .. } => "too_many_rules",
            Self::FilenameMismatch { .. } => "filename_mismatch",
            Self::InvalidName { .. } => "invalid_name",
            Self::StructuralMismatch { .. } => "structural_mismatch",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                message,
                line,
                column,
            } => write!(f, "Parse error at {line}:{column}: {message}"),
            Self::TooManyRules { count, selectors } => write!(
                f,
                "Found {count} top-level class rules ({}), at most one is allowed",
                selectors.join(", ")
            ),
            Self::FilenameMismatch {
                selector,
                file_name,
            } => write!(
                f,
                "Selector '{selector}' does not match file name '{file_name}'"
            ),
            Self::InvalidName { selector, raw_name } => write!(
                f,
                "Selector '{selector}' is not a valid name: '{raw_name}' cannot be decomposed"
            ),
            Self::StructuralMismatch { selector, expected } => write!(
                f,
                "Selector '{selector}' does not match the directory structure, expected '{expected}'"
            ),
        }
    }
}

/// A naming violation located in a specific file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What went wrong
    pub kind: ViolationKind,
    /// File the violation was found in
    pub file_path: PathBuf,
    /// 1-based line of the offending rule, when known
    pub line: Option<u32>,
}

impl Violation {
    /// Wrap a kind with the file it belongs to
    pub fn new(kind: ViolationKind, file_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            file_path: file_path.into(),
            line: None,
        }
    }

    /// Attach the source line of the offending rule
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn rule_id(&self) -> &'static str {
        self.kind.id()
    }

    /// Format violation for display
    pub fn format_display(&self) -> String {
        let location = match self.line {
            Some(line) => format!(":{line}"),
            None => String::new(),
        };

        format!(
            "{}{} [{}] {}",
            self.file_path.display(),
            location,
            self.rule_id(),
            self.kind
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_display())
    }
}

impl std::error::Error for Violation {}

/// Outcome of a validation run that completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Files that held exactly one candidate rule and were checked
    pub files_checked: usize,
    /// Files with no candidate rule
    pub files_skipped: usize,
    /// The first violation found, if any
    pub violation: Option<Violation>,
    /// Total execution time in milliseconds
    pub execution_time_ms: u64,
    /// Timestamp when validation was performed
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            files_checked: 0,
            files_skipped: 0,
            violation: None,
            execution_time_ms: 0,
            validated_at: Utc::now(),
        }
    }

    /// Whether every enumerated file was accordant
    pub fn is_accordant(&self) -> bool {
        self.violation.is_none()
    }

    /// Total number of files looked at before the run ended
    pub fn total_files(&self) -> usize {
        self.files_checked + self.files_skipped
    }

    pub fn set_execution_time(&mut self, duration_ms: u64) {
        self.execution_time_ms = duration_ms;
    }

    /// Fold a later report into this one, keeping the first violation
    pub fn merge(&mut self, other: ValidationReport) {
        self.files_checked += other.files_checked;
        self.files_skipped += other.files_skipped;
        if self.violation.is_none() {
            self.violation = other.violation;
        }
    }

    /// Turn a found violation into an `Err`
    pub fn into_result(self) -> Result<Self, Violation> {
        match self.violation {
            Some(violation) => Err(violation),
            None => Ok(self),
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that keep a validation run from completing
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or accessed
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Glob or regex compilation failed
    #[error("Pattern error: {message}")]
    Pattern { message: String },

    /// Directory traversal failed
    #[error("Walk error: {message}")]
    Walk { message: String },
}

impl GuardError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a pattern error
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }

    /// Create a walk error
    pub fn walk(message: impl Into<String>) -> Self {
        Self::Walk {
            message: message.into(),
        }
    }
}

/// Result type for Guard operations
pub type GuardResult<T> = Result<T, GuardError>;
