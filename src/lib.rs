//! Naming Guard - block/element/modifier naming accordance for style-sheets
//!
//! Architecture: Clean Architecture - Library interface serves as the application layer
//! - Every style-sheet declares at most one top-level class rule
//! - That class matches the file's base name and its place in the directory tree
//! - Violations are reported values; only failures to run are errors

pub mod analyzer;
pub mod config;
pub mod domain;
pub mod patterns;
pub mod report;
pub mod stylesheet;

// Re-export main types for convenient access
pub use domain::identity::{IdentityShape, Modifier, NamingIdentity};
pub use domain::violations::{
    GuardError, GuardResult, ValidationReport, Violation, ViolationKind,
};

pub use config::{ConfigBuilder, FileConfig, NamingConfig, NamingPreset, NamingSchemeConfig};

pub use analyzer::accordance::AccordanceChecker;
pub use analyzer::rules::{CandidateRule, RuleExtractor};
pub use analyzer::{DirectoryValidator, FileOutcome};

pub use patterns::{NamingScheme, PathFilter};

pub use report::{OutputFormat, ReportFormatter, ReportOptions};

pub use stylesheet::{NodeKind, ParseError, StyleNode, Stylesheet};

use std::path::Path;

/// Validate every style-sheet under `directory` with `config`.
///
/// `Ok` with an accordant report means every file passed; `Ok` with
/// `report.violation` set names the first offending file; `Err` means the run
/// could not complete.
pub fn check_naming<P: AsRef<Path>>(
    directory: P,
    config: &NamingConfig,
) -> GuardResult<ValidationReport> {
    DirectoryValidator::new(config.clone())?.validate(directory)
}
