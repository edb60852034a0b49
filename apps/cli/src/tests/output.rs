// Unit tests for terminal rendering of verdicts and errors

use crate::error::CliError;
use crate::output::{error_lines, report_lines};

use models::{FailedCase, JudgeOutcome, JudgeReport, JudgeReportBuilder};

fn accepted() -> JudgeReport {
    JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::Accepted)
        .with_raw_status_text("Accepted")
        .with_runtime(Some(String::from("4 ms")))
        .with_runtime_percentile(Some(91.234))
        .with_memory(Some(String::from("17.2 MB")))
        .with_memory_percentile(Some(40.0))
        .with_counts(Some(63), Some(63))
        .build()
        .unwrap()
}

/// **VALUE**: Verifies the accepted summary: status, percentiles, counts.
///
/// **WHY THIS MATTERS**: This is what a user reads after every submit.
///
/// **BUG THIS CATCHES**: Would catch percentile formatting drifting from one decimal.
#[test]
fn given_accepted_report_when_rendered_then_stats_lines_present() {
    // GIVEN: An accepted report
    let report = accepted();

    // WHEN: Rendering without color
    let lines = report_lines(&report, false);

    // THEN: Expected lines in order
    assert!(lines.contains(&String::from("✓ Accepted")));
    assert!(lines.contains(&String::from("  Runtime: 4 ms (faster than 91.2%)")));
    assert!(lines.contains(&String::from("  Memory: 17.2 MB (less than 40.0%)")));
    assert!(lines.contains(&String::from("  Tests: 63/63 passed")));
    assert!(!lines.iter().any(|l| l.contains("Failed Test")));
}

/// **VALUE**: Verifies the failing case is shown with input, expected and actual.
///
/// **BUG THIS CATCHES**: Would catch expected/actual being swapped.
#[test]
fn given_wrong_answer_when_rendered_then_failed_case_shown() {
    // GIVEN: A wrong answer with a failing case
    let report = JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::WrongAnswer)
        .with_raw_status_text("Wrong Answer")
        .with_failed_case(Some(FailedCase {
            input: String::from("[3,3]\n6"),
            expected: String::from("[0,1]"),
            actual: String::from("[1,0]"),
        }))
        .with_counts(Some(12), Some(63))
        .build()
        .unwrap();

    // WHEN: Rendering
    let lines = report_lines(&report, false);

    // THEN: Cross mark and the case
    assert!(lines.contains(&String::from("✗ Wrong Answer")));
    assert!(lines.contains(&String::from("  Tests: 12/63 passed")));
    assert!(lines.contains(&String::from("    Expected: [0,1]")));
    assert!(lines.contains(&String::from("    Got: [1,0]")));
}

/// **VALUE**: Verifies color codes appear only when asked for.
///
/// **WHY THIS MATTERS**: Piped output (CI logs, files) must stay plain.
///
/// **BUG THIS CATCHES**: Would catch escape codes leaking into non-terminal output.
#[test]
fn given_color_flag_when_rendered_then_escape_codes_follow_it() {
    // GIVEN: An accepted report
    let report = accepted();

    // WHEN: Rendering both ways
    let plain = report_lines(&report, false);
    let colored = report_lines(&report, true);

    // THEN: Only the colored rendering carries ANSI escapes
    assert!(!plain.iter().any(|l| l.contains('\x1b')));
    assert!(colored.iter().any(|l| l.contains("\x1b[32m")));
}

#[test]
fn given_compile_error_when_rendered_then_error_block_shown() {
    // GIVEN: A compile error
    let report = JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::CompileError)
        .with_raw_status_text("Compile Error")
        .with_compile_error(Some(String::from("Line 3: SyntaxError")))
        .build()
        .unwrap();

    // WHEN/THEN
    let lines = report_lines(&report, false);
    assert!(lines.contains(&String::from("  Compile Error:")));
    assert!(lines.contains(&String::from("  Line 3: SyntaxError")));
}

/// **VALUE**: Verifies errors print as `Error:` plus an optional `Hint:` line.
///
/// **BUG THIS CATCHES**: Would catch an empty `Hint:` line for hintless errors.
#[test]
fn given_error_without_hint_when_rendered_then_single_line() {
    // GIVEN: An error with no hint
    let err = CliError::invalid_input("editor is not set");

    // WHEN/THEN
    assert_eq!(error_lines(&err), vec![String::from("Error: editor is not set")]);
}
