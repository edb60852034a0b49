// Unit tests for error module
// Tests how CLI errors reduce to the lines a user sees

use crate::error::CliError;

use client_core::error::judge::{JudgeError, NOT_LOGGED_IN_MESSAGE};

use std::io::{Error as IoError, ErrorKind};

/// **VALUE**: Verifies that core errors keep their own summary and hint.
///
/// **WHY THIS MATTERS**: The CLI prints `Error:` and `Hint:` lines from these. The
/// hint is the only guidance a signed-out user gets.
///
/// **BUG THIS CATCHES**: Would catch if the conversion wrapped the core error in a
/// generic CLI message, dropping the remediation hint.
#[test]
fn given_judge_auth_error_when_converted_then_summary_and_hint_survive() {
    // GIVEN: A judge error raised before any request was sent
    let core = JudgeError::auth(NOT_LOGGED_IN_MESSAGE);

    // WHEN: Converting into a CLI error
    let err = CliError::from(core);

    // THEN: Summary is the core message, hint is present
    assert_eq!(err.summary(), NOT_LOGGED_IN_MESSAGE);
    assert!(err.hint().is_some(), "Auth errors should carry a hint");
}

/// **VALUE**: Verifies that summaries never leak the source location.
///
/// **WHY THIS MATTERS**: `Display` includes file and line for logs; the terminal
/// line should read like a sentence.
///
/// **BUG THIS CATCHES**: Would catch if summary() fell back to to_string().
#[test]
fn given_invalid_input_when_summarized_then_no_location_in_text() {
    // GIVEN: An invalid input error
    let err = CliError::invalid_input("retries is not set");

    // WHEN: Summarizing
    let summary = err.summary();

    // THEN: Plain message only, no hint
    assert_eq!(summary, "retries is not set");
    assert!(!summary.contains(".rs"));
    assert!(err.hint().is_none());
    assert!(err.to_string().contains("Invalid Input Error"));
}

/// **VALUE**: Verifies that a broken stdout turns into a CLI error.
///
/// **WHY THIS MATTERS**: Commands write through `?`; piping into `head` closes
/// stdout early and must not panic.
///
/// **BUG THIS CATCHES**: Would catch if io errors were mapped to a core variant
/// with a misleading hint.
#[test]
fn given_io_error_when_converted_then_cli_variant() {
    // GIVEN: A broken pipe
    let io = IoError::new(ErrorKind::BrokenPipe, "pipe closed");

    // WHEN: Converting
    let err = CliError::from(io);

    // THEN: Cli variant mentioning output
    assert!(matches!(err, CliError::Cli { .. }));
    assert!(err.summary().starts_with("Failed to write output"));
}
