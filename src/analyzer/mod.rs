//! Main validation orchestrator for Naming Guard
//!
//! CDD Principle: Domain Services - DirectoryValidator orchestrates the naming workflow
//! - Coordinates file discovery, parsing, rule extraction and accordance checks
//! - Runs strictly in enumeration order and stops at the first violation
//! - Separates "found a violation" (a report) from "could not run" (an error)

pub mod accordance;
pub mod rules;

use crate::analyzer::accordance::AccordanceChecker;
use crate::analyzer::rules::RuleExtractor;
use crate::config::NamingConfig;
use crate::domain::violations::{GuardError, GuardResult, ValidationReport, Violation, ViolationKind};
use crate::patterns::{NamingScheme, PathFilter};
use crate::stylesheet::Stylesheet;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Verdict for a single style-sheet file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Exactly one candidate rule, accordant with its path
    Checked,
    /// No candidate rule, nothing to check
    Skipped,
    Violated(Violation),
}

/// Validates style-sheet trees against one injected naming configuration
pub struct DirectoryValidator {
    /// Configuration for this validator
    config: NamingConfig,
    /// Naming scheme selectors are decomposed with
    scheme: NamingScheme,
    /// Path filter for determining which files to validate
    path_filter: PathFilter,
    extractor: RuleExtractor,
}

impl DirectoryValidator {
    /// Create a new validator with the given configuration
    pub fn new(config: NamingConfig) -> GuardResult<Self> {
        config.validate()?;

        let scheme = NamingScheme::from_config(&config.naming)?;
        let path_filter = PathFilter::from_config(&config.files)
            .map_err(|e| GuardError::config(format!("Failed to create path filter: {e}")))?;

        Ok(Self {
            config,
            scheme,
            path_filter,
            extractor: RuleExtractor::new(),
        })
    }

    /// Create a validator with default configuration
    pub fn with_defaults() -> GuardResult<Self> {
        Self::new(NamingConfig::default())
    }

    /// Configuration this validator was built from
    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Naming scheme selectors are decomposed with
    pub fn scheme(&self) -> &NamingScheme {
        &self.scheme
    }

    /// Exclude additional paths for this validator only
    pub fn add_exclude(&mut self, pattern: impl Into<String>) -> GuardResult<()> {
        self.path_filter.add_pattern(pattern.into())
    }

    /// Checker bound to this validator's scheme and file suffix
    pub fn accordance_checker(&self) -> AccordanceChecker<'_> {
        AccordanceChecker::new(&self.scheme, self.path_filter.extension())
    }

    /// Check already-loaded style-sheet source as if read from `file_path`
    pub fn check_source(&self, file_path: &Path, content: &str) -> FileOutcome {
        let sheet = match Stylesheet::parse(content) {
            Ok(sheet) => sheet,
            Err(e) => {
                let violation = Violation::new(
                    ViolationKind::Parse {
                        message: e.message,
                        line: e.line,
                        column: e.column,
                    },
                    file_path,
                )
                .with_line(e.line);
                return FileOutcome::Violated(violation);
            }
        };

        let candidates = self.extractor.extract(&sheet);
        let rule = match candidates.as_slice() {
            [] => return FileOutcome::Skipped,
            [rule] => rule,
            [first, ..] => {
                let violation = Violation::new(
                    ViolationKind::TooManyRules {
                        count: candidates.len(),
                        selectors: candidates.iter().map(|r| r.selector.to_string()).collect(),
                    },
                    file_path,
                )
                .with_line(first.line);
                return FileOutcome::Violated(violation);
            }
        };

        match self.accordance_checker().check(rule.selector, file_path) {
            Ok(()) => FileOutcome::Checked,
            Err(kind) => FileOutcome::Violated(Violation::new(kind, file_path).with_line(rule.line)),
        }
    }

    /// Read and check a single style-sheet file
    pub fn validate_file<P: AsRef<Path>>(&self, file_path: P) -> GuardResult<FileOutcome> {
        let file_path = file_path.as_ref();
        let content =
            fs::read_to_string(file_path).map_err(|e| GuardError::io(file_path, e))?;

        let outcome = self.check_source(file_path, &content);
        tracing::debug!("{}: {:?}", file_path.display(), outcome);
        Ok(outcome)
    }

    /// Validate every style-sheet under `root`, stopping at the first violation
    pub fn validate<P: AsRef<Path>>(&self, root: P) -> GuardResult<ValidationReport> {
        let root = root.as_ref();
        let start_time = Instant::now();
        let mut report = ValidationReport::new();

        for file_path in self.path_filter.find_files(root)? {
            match self.validate_file(&file_path)? {
                FileOutcome::Checked => report.files_checked += 1,
                FileOutcome::Skipped => report.files_skipped += 1,
                FileOutcome::Violated(violation) => {
                    report.violation = Some(violation);
                    break;
                }
            }
        }

        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        tracing::info!(
            "Validated {} in {}ms: {} checked, {} skipped, accordant: {}",
            root.display(),
            report.execution_time_ms,
            report.files_checked,
            report.files_skipped,
            report.is_accordant()
        );

        Ok(report)
    }

    /// Validate several roots in order, stopping at the first violation
    pub fn validate_paths<P: AsRef<Path>>(&self, roots: &[P]) -> GuardResult<ValidationReport> {
        let start_time = Instant::now();
        let mut report = ValidationReport::new();

        for root in roots {
            report.merge(self.validate(root)?);
            if !report.is_accordant() {
                break;
            }
        }

        report.set_execution_time(start_time.elapsed().as_millis() as u64);
        Ok(report)
    }
}
