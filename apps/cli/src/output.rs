//! Terminal rendering of judge reports and errors.

use crate::error::CliError;

use models::JudgeReport;

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Lines describing a verdict: status, stats, errors and the failing case.
pub fn report_lines(report: &JudgeReport, color: bool) -> Vec<String> {
    let (icon, tint) = if report.is_accepted() {
        ("✓", GREEN)
    } else {
        ("✗", RED)
    };

    let mut lines = vec![
        String::new(),
        paint(&format!("{icon} {}", report.raw_status_text()), tint, color),
    ];

    if let Some(runtime) = report.runtime() {
        lines.push(match report.runtime_percentile() {
            Some(p) => format!("  Runtime: {runtime} (faster than {p:.1}%)"),
            None => format!("  Runtime: {runtime}"),
        });
    }
    if let Some(memory) = report.memory() {
        lines.push(match report.memory_percentile() {
            Some(p) => format!("  Memory: {memory} (less than {p:.1}%)"),
            None => format!("  Memory: {memory}"),
        });
    }
    if let (Some(passed), Some(total)) = (report.passed_count(), report.total_count()) {
        lines.push(format!("  Tests: {passed}/{total} passed"));
    }
    if let Some(error) = report.compile_error() {
        lines.extend([String::new(), String::from("  Compile Error:"), format!("  {error}")]);
    }
    if let Some(error) = report.runtime_error() {
        lines.extend([String::new(), String::from("  Runtime Error:"), format!("  {error}")]);
    }
    if let Some(case) = report.failed_case() {
        lines.extend([
            String::new(),
            String::from("  Failed Test:"),
            format!("    Input: {}", case.input),
            format!("    Expected: {}", case.expected),
            format!("    Got: {}", case.actual),
        ]);
    }

    lines.push(String::new());
    lines
}

/// `Error: <summary>` plus the hint on its own line.
pub fn error_lines(error: &CliError) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", error.summary())];
    if let Some(hint) = error.hint() {
        lines.push(format!("Hint: {hint}"));
    }
    lines
}
