// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation report types and message rendering.

use std::collections::BTreeMap;

use console::style;
use serde::Serialize;

/// Render a rule's message template for a field, substituting the
/// literal `:field:` placeholder.
pub fn render_message(template: &str, field: &str) -> String {
    template.replace(":field:", field)
}

/// A lookup fault recorded while failing closed: the collaborator could
/// not answer, so the rule was treated as failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupFault {
    /// Field being evaluated when the fault occurred.
    pub field: String,
    /// Rule that issued the lookup.
    pub rule: String,
    /// The collaborator's error, rendered.
    pub message: String,
}

/// Aggregate outcome of one validation pass.
///
/// Fields map to their ordered failure messages; a field absent from the
/// map passed all of its rules. Lookup faults, when the fail-closed
/// policy is active, are listed separately so infrastructure trouble is
/// never mistaken for ordinary invalid input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    failures: BTreeMap<String, Vec<String>>,
    faults: Vec<LookupFault>,
}

impl ValidationReport {
    /// An empty (passing) report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of failure messages across all fields.
    pub fn failure_count(&self) -> usize {
        self.failures.values().map(Vec::len).sum()
    }

    /// Failure messages for one field, in rule order. Empty for a field
    /// that passed or was never configured.
    pub fn messages_for(&self, field: &str) -> &[String] {
        self.failures.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All failing fields and their messages.
    pub fn failures(&self) -> &BTreeMap<String, Vec<String>> {
        &self.failures
    }

    /// Lookup faults recorded under the fail-closed policy.
    pub fn faults(&self) -> &[LookupFault] {
        &self.faults
    }

    pub(crate) fn record_failure(&mut self, field: &str, message: String) {
        self.failures.entry(field.to_string()).or_default().push(message);
    }

    pub(crate) fn record_fault(&mut self, fault: LookupFault) {
        self.faults.push(fault);
    }

    /// Format the report for terminal output.
    pub fn format(&self) -> String {
        let mut output = String::new();

        for (field, messages) in &self.failures {
            for message in messages {
                output.push_str(&format!(
                    "{} {} {}\n",
                    style("✗").red().bold(),
                    style(field).cyan(),
                    message
                ));
            }
        }

        for fault in &self.faults {
            output.push_str(&format!(
                "{} lookup fault on '{}' ({}): {}\n",
                style("⚠").yellow().bold(),
                fault.field,
                fault.rule,
                fault.message
            ));
        }

        output
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.is_valid() {
            if self.faults.is_empty() {
                "Valid".to_string()
            } else {
                format!("Valid ({} lookup faults)", self.faults.len())
            }
        } else {
            format!(
                "Invalid ({} failures across {} fields)",
                self.failure_count(),
                self.failures.len()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        assert_eq!(
            render_message("Field :field: is required", "email"),
            "Field email is required"
        );
        assert_eq!(render_message("no placeholder", "email"), "no placeholder");
    }

    #[test]
    fn test_report_empty_is_valid() {
        let report = ValidationReport::new();
        assert!(report.is_valid());
        assert_eq!(report.failure_count(), 0);
        assert!(report.messages_for("anything").is_empty());
        assert_eq!(report.summary(), "Valid");
    }

    #[test]
    fn test_report_records_failures_in_order() {
        let mut report = ValidationReport::new();
        report.record_failure("email", "Field email is required".to_string());
        report.record_failure("email", "Field email has a bad email format".to_string());

        assert!(!report.is_valid());
        assert_eq!(report.failure_count(), 2);
        assert_eq!(report.messages_for("email").len(), 2);
        assert!(report.messages_for("email")[0].contains("required"));
        assert!(report.summary().contains("Invalid"));
    }

    #[test]
    fn test_report_faults_do_not_pass_silently() {
        let mut report = ValidationReport::new();
        report.record_fault(LookupFault {
            field: "email".to_string(),
            rule: "unique".to_string(),
            message: "Lookup timed out after 250ms".to_string(),
        });

        // A fault alone leaves the report valid but visible.
        assert!(report.is_valid());
        assert_eq!(report.faults().len(), 1);
        assert!(report.summary().contains("lookup fault"));
        assert!(report.format().contains("unique"));
    }

    #[test]
    fn test_report_json() {
        let mut report = ValidationReport::new();
        report.record_failure("name", "Field name is required".to_string());

        let json = report.to_json();
        assert!(json.contains("\"failures\""));
        assert!(json.contains("Field name is required"));
    }
}
