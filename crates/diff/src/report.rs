//! DiffReport: classified diagnostics rendered for console and JSON output.
//!
//! Grouping errors before warnings is a presentation concern only; the
//! diagnostics vector itself stays in discovery order.

use serde::Serialize;
use serde_json::Value;

use crate::classify::{error_count, has_errors, only_errors, only_warnings, warning_count, Diagnostic};

/// Summary counts over a diagnostic sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub total: usize,
}

/// The final output of a comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct DiffReport {
    /// All diagnostics, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ReportSummary,
}

impl DiffReport {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        let summary = ReportSummary {
            error_count: error_count(&diagnostics),
            warning_count: warning_count(&diagnostics),
            total: diagnostics.len(),
        };
        DiffReport {
            diagnostics,
            summary,
        }
    }

    /// Whether any diagnostic has error severity. Callers gate exit status
    /// on this.
    pub fn has_errors(&self) -> bool {
        has_errors(&self.diagnostics)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Format as human-readable text, errors grouped before warnings.
    pub fn to_text(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} problem(s): {} error(s), {} warning(s)",
            self.summary.total, self.summary.error_count, self.summary.warning_count
        ));

        let errors = only_errors(&self.diagnostics);
        if !errors.is_empty() {
            lines.push(String::new());
            lines.push("ERRORS:".to_string());
            for d in errors {
                lines.push(format!(
                    "  {}: {}",
                    d.mismatch.violation_key, d.mismatch.message
                ));
            }
        }

        let warnings = only_warnings(&self.diagnostics);
        if !warnings.is_empty() {
            lines.push(String::new());
            lines.push("WARNINGS:".to_string());
            for d in warnings {
                lines.push(format!(
                    "  {}: {}",
                    d.mismatch.violation_key, d.mismatch.message
                ));
            }
        }

        lines.join("\n")
    }
}
