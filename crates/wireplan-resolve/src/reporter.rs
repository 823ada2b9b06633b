//! Resolution Report Generation
//!
//! Generates reports in multiple formats:
//! - JSON for the code generation stage and tooling
//! - Human-readable for terminal output
//! - CI summary for GitHub Actions annotations

use crate::diagnostic::{Diagnostic, DiagnosticCategory};
use crate::diagnostics::WiringDiagnostic;
use crate::outcome::{ResolutionOutcome, WiringPlan};
use crate::Severity;
use serde::{Deserialize, Serialize};
use wireplan_domain::QualifiedName;

/// A diagnostic flattened for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    pub id: String,
    pub category: DiagnosticCategory,
    pub severity: Severity,
    pub element: QualifiedName,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&WiringDiagnostic> for DiagnosticEntry {
    fn from(diagnostic: &WiringDiagnostic) -> Self {
        Self {
            id: diagnostic.id().to_string(),
            category: diagnostic.category(),
            severity: diagnostic.severity(),
            element: diagnostic.element().clone(),
            message: diagnostic.message(),
            suggestion: diagnostic.suggestion(),
        }
    }
}

/// Summary of a resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Total number of planned sockets
    pub total_sockets: usize,
    pub resolved_single: usize,
    pub resolved_multi: usize,
    pub unresolved: usize,
    pub ambiguous: usize,
    pub missing_required: usize,
    /// Number of error-level diagnostics
    pub error_count: usize,
    /// Number of warning-level diagnostics
    pub warning_count: usize,
    /// Number of dependency cycles
    pub cycle_count: usize,
    /// Number of declaration diagnostics (names, imports, selectors)
    pub declaration_count: usize,
    /// Number of directive diagnostics
    pub directive_count: usize,
    /// Whether the plan may be handed to code generation
    pub passed: bool,
}

/// Wiring plan plus every diagnostic of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Timestamp of the resolution run
    pub generated_at: String,
    pub summary: ResolutionSummary,
    pub plan: WiringPlan,
    /// Diagnostics ordered by element, id and message
    pub diagnostics: Vec<DiagnosticEntry>,
}

impl ResolutionReport {
    /// Assemble a report from a plan and its ordered diagnostics
    pub fn new(plan: WiringPlan, diagnostics: &[WiringDiagnostic]) -> Self {
        let mut summary = ResolutionSummary {
            total_sockets: plan.len(),
            ..ResolutionSummary::default()
        };
        for entry in plan.iter() {
            match entry.outcome {
                ResolutionOutcome::Unresolved => summary.unresolved += 1,
                ResolutionOutcome::ResolvedSingle { .. } => summary.resolved_single += 1,
                ResolutionOutcome::ResolvedMulti { .. } => summary.resolved_multi += 1,
                ResolutionOutcome::Ambiguous { .. } => summary.ambiguous += 1,
                ResolutionOutcome::MissingRequired => summary.missing_required += 1,
            }
        }
        for diagnostic in diagnostics {
            match diagnostic.severity() {
                Severity::Error => summary.error_count += 1,
                Severity::Warning => summary.warning_count += 1,
            }
            match diagnostic.category() {
                DiagnosticCategory::Cycle => summary.cycle_count += 1,
                DiagnosticCategory::Declaration => summary.declaration_count += 1,
                DiagnosticCategory::Directive => summary.directive_count += 1,
                DiagnosticCategory::Resolution | DiagnosticCategory::Type => {}
            }
        }
        summary.passed = summary.error_count == 0;

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
            plan,
            diagnostics: diagnostics.iter().map(DiagnosticEntry::from).collect(),
        }
    }

    /// Whether code generation must be refused
    pub fn has_errors(&self) -> bool {
        !self.summary.passed
    }

    /// Diagnostics attached to one element
    pub fn diagnostics_for<'a>(&'a self, element: &'a QualifiedName) -> impl Iterator<Item = &'a DiagnosticEntry> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| &diagnostic.element == element)
    }

    /// Diagnostics with a given id
    pub fn diagnostics_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a DiagnosticEntry> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.id == id)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DiagnosticEntry> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &DiagnosticEntry> {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
    }
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(report: &ResolutionReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Generate human-readable report
    pub fn to_human_readable(report: &ResolutionReport) -> String {
        let mut output = String::new();

        output.push_str("=== Wiring Resolution Report ===\n\n");
        output.push_str(&format!("Generated: {}\n\n", report.generated_at));

        // Summary
        let summary = &report.summary;
        output.push_str("--- Summary ---\n");
        output.push_str(&format!("Sockets:           {}\n", summary.total_sockets));
        output.push_str(&format!("  Single:          {}\n", summary.resolved_single));
        output.push_str(&format!("  Multi:           {}\n", summary.resolved_multi));
        output.push_str(&format!("  Unresolved:      {}\n", summary.unresolved));
        output.push_str(&format!("  Ambiguous:       {}\n", summary.ambiguous));
        output.push_str(&format!("  Missing:         {}\n", summary.missing_required));
        output.push_str(&format!("Errors:            {}\n", summary.error_count));
        output.push_str(&format!("Warnings:          {}\n", summary.warning_count));
        output.push_str(&format!("Cycles:            {}\n", summary.cycle_count));
        output.push('\n');

        let status = if summary.passed { "PASSED" } else { "FAILED" };
        output.push_str(&format!("Status: {status}\n\n"));

        if !report.plan.is_empty() {
            output.push_str("--- Wiring Plan ---\n");
            for entry in report.plan.iter() {
                output.push_str(&format!(
                    "  {} ({}) <- {}\n",
                    entry.socket, entry.multiplicity, entry.outcome
                ));
            }
            output.push('\n');
        }

        if !report.diagnostics.is_empty() {
            output.push_str("--- Diagnostics ---\n");
            for diagnostic in &report.diagnostics {
                output.push_str(&format!(
                    "  [{}] {} {}\n",
                    diagnostic.severity, diagnostic.id, diagnostic.message
                ));
                if let Some(suggestion) = &diagnostic.suggestion {
                    output.push_str(&format!("      help: {suggestion}\n"));
                }
            }
            output.push('\n');
        }

        output
    }

    /// Generate CI summary (GitHub Actions format)
    pub fn to_ci_summary(report: &ResolutionReport) -> String {
        let mut output = String::new();

        output.push_str("## Wiring Resolution\n\n");

        // Status badge
        if report.summary.passed {
            output.push_str("**Status:** :white_check_mark: PASSED\n\n");
        } else {
            output.push_str("**Status:** :x: FAILED\n\n");
        }

        // Summary table
        output.push_str("| Outcome | Count |\n");
        output.push_str("|---------|-------|\n");
        output.push_str(&format!("| Resolved (single) | {} |\n", report.summary.resolved_single));
        output.push_str(&format!("| Resolved (multi) | {} |\n", report.summary.resolved_multi));
        output.push_str(&format!("| Unresolved | {} |\n", report.summary.unresolved));
        output.push_str(&format!("| Ambiguous | {} |\n", report.summary.ambiguous));
        output.push_str(&format!("| Missing | {} |\n", report.summary.missing_required));
        output.push_str(&format!("| Cycles | {} |\n", report.summary.cycle_count));
        output.push('\n');

        // Workflow annotations
        for diagnostic in &report.diagnostics {
            let level = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            output.push_str(&format!(
                "::{level} title={}::{}\n",
                diagnostic.id, diagnostic.message
            ));
        }

        output
    }
}
