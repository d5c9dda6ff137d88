//! Report generation with multiple output formats
//!
//! CDD Principle: Anti-Corruption Layer - Formatters translate domain objects to external formats
//! - ValidationReport (domain) is converted to various external representations
//! - The human format stays silent when every file is accordant

use crate::domain::violations::{GuardError, GuardResult, ValidationReport, Violation};
use colored::Colorize;
use std::io::Write;

/// Supported output formats for validation reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable diagnostics
    Human,
    /// JSON format for programmatic consumption
    Json,
    /// GitHub Actions workflow commands
    GitHub,
}

/// Options for customizing report output
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Whether to use colored output (for human format)
    pub use_colors: bool,
    /// Print a summary line even when everything is accordant
    pub show_summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_summary: false,
        }
    }
}

/// Renders validation reports
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    options: ReportOptions,
}

impl ReportFormatter {
    /// Create a new report formatter with options
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Format a validation report in the specified format
    pub fn format_report(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
    ) -> GuardResult<String> {
        match format {
            OutputFormat::Human => Ok(self.format_human(report)),
            OutputFormat::Json => self.format_json(report),
            OutputFormat::GitHub => Ok(self.format_github(report)),
        }
    }

    /// Write a formatted report to a writer
    pub fn write_report<W: Write>(
        &self,
        report: &ValidationReport,
        format: OutputFormat,
        mut writer: W,
    ) -> GuardResult<()> {
        let formatted = self.format_report(report, format)?;
        writer
            .write_all(formatted.as_bytes())
            .map_err(|e| GuardError::io("<report output>", e))?;
        Ok(())
    }

    fn format_human(&self, report: &ValidationReport) -> String {
        let mut output = String::new();

        if let Some(violation) = &report.violation {
            output.push_str(&self.format_violation(violation));
            output.push('\n');
        }

        if self.options.show_summary {
            output.push_str(&self.format_summary(report));
            output.push('\n');
        }

        output
    }

    fn format_violation(&self, violation: &Violation) -> String {
        let location = match violation.line {
            Some(line) => format!("{}:{}", violation.file_path.display(), line),
            None => violation.file_path.display().to_string(),
        };

        if self.options.use_colors {
            format!(
                "{} {} [{}] {}",
                "error:".red().bold(),
                location.bold(),
                violation.rule_id().dimmed(),
                violation.kind
            )
        } else {
            format!(
                "error: {} [{}] {}",
                location,
                violation.rule_id(),
                violation.kind
            )
        }
    }

    fn format_summary(&self, report: &ValidationReport) -> String {
        let verdict = if report.is_accordant() {
            "All style-sheets accordant"
        } else {
            "Stopped at first violation"
        };
        let summary = format!(
            "{}: {} checked, {} without class rules, {}ms",
            verdict, report.files_checked, report.files_skipped, report.execution_time_ms
        );

        match (self.options.use_colors, report.is_accordant()) {
            (true, true) => summary.green().to_string(),
            (true, false) => summary.yellow().to_string(),
            (false, _) => summary,
        }
    }

    fn format_json(&self, report: &ValidationReport) -> GuardResult<String> {
        let json_report = serde_json::json!({
            "accordant": report.is_accordant(),
            "files_checked": report.files_checked,
            "files_skipped": report.files_skipped,
            "violation": report.violation.as_ref().map(|v| serde_json::json!({
                "rule_id": v.rule_id(),
                "file_path": v.file_path.display().to_string(),
                "line": v.line,
                "message": v.kind.to_string(),
                "details": &v.kind,
            })),
            "execution_time_ms": report.execution_time_ms,
            "validated_at": report.validated_at.to_rfc3339(),
        });

        serde_json::to_string_pretty(&json_report)
            .map_err(|e| GuardError::config(format!("JSON serialization failed: {e}")))
    }

    fn format_github(&self, report: &ValidationReport) -> String {
        let Some(violation) = &report.violation else {
            return String::new();
        };

        let line_part = violation
            .line
            .map(|line| format!(",line={line}"))
            .unwrap_or_default();

        format!(
            "::error file={}{},title={}::{}\n",
            violation.file_path.display(),
            line_part,
            violation.rule_id(),
            escape_github(&violation.kind.to_string())
        )
    }
}

/// Escape workflow command data
fn escape_github(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violations::ViolationKind;

    fn plain() -> ReportFormatter {
        ReportFormatter::new(ReportOptions {
            use_colors: false,
            show_summary: false,
        })
    }

    fn failing_report() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.files_checked = 3;
        report.violation = Some(
            Violation::new(
                ViolationKind::StructuralMismatch {
                    selector: ".button".to_string(),
                    expected: "button/button.css".to_string(),
                },
                "wrong/button.css",
            )
            .with_line(2),
        );
        report
    }

    #[test]
    fn test_human_is_silent_on_success() {
        let output = plain()
            .format_report(&ValidationReport::new(), OutputFormat::Human)
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_human_violation() {
        let output = plain()
            .format_report(&failing_report(), OutputFormat::Human)
            .unwrap();

        assert_eq!(
            output,
            "error: wrong/button.css:2 [structural_mismatch] Selector '.button' does not match the directory structure, expected 'button/button.css'\n"
        );
    }

    #[test]
    fn test_human_summary() {
        let formatter = ReportFormatter::new(ReportOptions {
            use_colors: false,
            show_summary: true,
        });
        let mut report = ValidationReport::new();
        report.files_checked = 2;
        report.files_skipped = 1;

        let output = formatter.format_report(&report, OutputFormat::Human).unwrap();
        assert!(output.starts_with("All style-sheets accordant: 2 checked, 1 without class rules"));
    }

    #[test]
    fn test_json_output() {
        let output = plain()
            .format_report(&failing_report(), OutputFormat::Json)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["accordant"], false);
        assert_eq!(json["files_checked"], 3);
        assert_eq!(json["violation"]["rule_id"], "structural_mismatch");
        assert_eq!(json["violation"]["line"], 2);
        assert_eq!(json["violation"]["details"]["expected"], "button/button.css");
    }

    #[test]
    fn test_github_output() {
        let output = plain()
            .format_report(&failing_report(), OutputFormat::GitHub)
            .unwrap();
        assert!(output.starts_with("::error file=wrong/button.css,line=2,title=structural_mismatch::"));

        let empty = plain()
            .format_report(&ValidationReport::new(), OutputFormat::GitHub)
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_write_report() {
        let mut buffer = Vec::new();
        plain()
            .write_report(&failing_report(), OutputFormat::GitHub, &mut buffer)
            .unwrap();
        assert!(!buffer.is_empty());
    }
}
