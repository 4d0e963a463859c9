//! Human-readable summaries of a toggle cycle

use std::fmt::Write as _;

use super::ToggleOutcome;

/// Formats toggle outcomes for terminal output
pub struct ToggleReporter;

impl ToggleReporter {
    /// Generate a summary of the cycle's outcome
    #[must_use]
    pub fn generate_summary(outcome: &ToggleOutcome) -> String {
        let mut summary = String::new();
        summary.push_str("\n=== Toggle Summary ===\n");

        let action = if outcome.forced {
            format!("{} (forced)", outcome.action.label())
        } else {
            outcome.action.label().to_string()
        };
        let _ = writeln!(summary, "Action: {action}");
        let _ = writeln!(summary, "Mods available: {}", outcome.available);
        let _ = writeln!(
            summary,
            "Mods installed: {} -> {}",
            outcome.installed_before, outcome.installed_after
        );

        let report = &outcome.report;
        if report.placed > 0 {
            let _ = writeln!(summary, "Placed: {}", report.placed);
        }
        if report.backed_up > 0 {
            let _ = writeln!(summary, "Backed up: {}", report.backed_up);
        }
        if report.restored > 0 {
            let _ = writeln!(summary, "Restored: {}", report.restored);
        }
        if report.removed > 0 {
            let _ = writeln!(summary, "Removed: {}", report.removed);
        }
        if report.orphans_removed > 0 {
            let _ = writeln!(summary, "Orphans cleaned: {}", report.orphans_removed);
        }
        if report.dirs_pruned > 0 {
            let _ = writeln!(summary, "Directories pruned: {}", report.dirs_pruned);
        }

        if !report.warnings.is_empty() {
            let _ = writeln!(summary, "\nWarnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                let _ = writeln!(summary, "  ! {warning}");
            }
        }
        if !report.errors.is_empty() {
            let _ = writeln!(summary, "\nErrors ({}):", report.errors.len());
            for error in &report.errors {
                let _ = writeln!(summary, "  ✗ {error}");
            }
        }

        let _ = writeln!(summary, "\nTotal operations: {}", report.total_operations());
        if report.is_success() {
            summary.push_str("Status: ✓ Success\n");
        } else {
            summary.push_str("Status: ✗ Completed with errors\n");
        }

        summary
    }
}
