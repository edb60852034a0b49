// Unit tests for check-payload normalization.
// The polling loop itself is covered in integration_tests/judge.rs

use crate::judge::report::CheckResponse;

use models::JudgeOutcome;

use serde_json::{Value, json};

fn check(value: Value) -> CheckResponse {
    serde_json::from_value(value).expect("check payload should parse")
}

/// **VALUE**: Verifies the terminal-state heuristic.
///
/// **WHY THIS MATTERS**: The judge answers `PENDING`/`STARTED` while working.
/// Treating those as terminal would report a verdict-less result.
#[test]
fn given_pending_and_finished_payloads_when_checked_then_only_finished_is_terminal() {
    assert!(!check(json!({ "state": "PENDING" })).is_terminal());
    assert!(!check(json!({ "state": "STARTED" })).is_terminal());
    assert!(check(json!({ "state": "SUCCESS" })).is_terminal());
    assert!(check(json!({ "status_msg": "Accepted" })).is_terminal());
}

/// **VALUE**: Verifies a compile-error field classifies as CompileError even
/// when the status text is something else.
///
/// **BUG THIS CATCHES**: Would catch classification that only looks at the
/// status text, which differs between test runs and submissions.
#[test]
fn given_compile_error_field_when_classified_then_compile_error() {
    let payload = check(json!({
        "state": "SUCCESS",
        "status_msg": "Compile Error",
        "full_compile_error": "Line 3: error: expected ';'"
    }));

    let report = payload.into_report().expect("report");

    assert_eq!(report.outcome(), JudgeOutcome::CompileError);
    assert_eq!(report.compile_error(), Some("Line 3: error: expected ';'"));
}

/// **VALUE**: Verifies an unrecognized status keeps its raw text.
#[test]
fn given_noncanonical_status_without_error_fields_when_classified_then_unknown_with_raw_text() {
    let payload = check(json!({ "state": "SUCCESS", "status_msg": "Output Limit Exceeded" }));

    let report = payload.into_report().expect("report");

    assert_eq!(report.outcome(), JudgeOutcome::Unknown);
    assert_eq!(report.raw_status_text(), "Output Limit Exceeded");
}

/// **VALUE**: Verifies a wrong answer forwards the failing case and counts.
#[test]
fn given_wrong_answer_with_case_when_normalized_then_case_and_counts_forwarded() {
    let payload = check(json!({
        "state": "SUCCESS",
        "status_msg": "Wrong Answer",
        "input_formatted": "[2,7,11,15], 9",
        "expected_output": "[0,1]",
        "code_output": "[1,0]",
        "total_correct": 12,
        "total_testcases": 63
    }));

    let report = payload.into_report().expect("report");

    assert_eq!(report.outcome(), JudgeOutcome::WrongAnswer);
    let case = report.failed_case().expect("failed case");
    assert_eq!(case.input, "[2,7,11,15], 9");
    assert_eq!(case.expected, "[0,1]");
    assert_eq!(case.actual, "[1,0]");
    assert_eq!(report.passed_count(), Some(12));
    assert_eq!(report.total_count(), Some(63));
}

/// **VALUE**: Verifies no failing case is invented when the payload has none.
#[test]
fn given_time_limit_without_case_when_normalized_then_no_failed_case() {
    let payload = check(json!({ "status_msg": "Time Limit Exceeded", "total_correct": "5", "total_testcases": "10" }));

    let report = payload.into_report().expect("report");

    assert_eq!(report.outcome(), JudgeOutcome::TimeLimitExceeded);
    assert!(report.failed_case().is_none());
    assert_eq!(report.passed_count(), Some(5));
}

/// **VALUE**: Verifies test-run answers (arrays) are joined one per line.
#[test]
fn given_array_answers_when_normalized_then_joined_by_newline() {
    let payload = check(json!({
        "state": "SUCCESS",
        "status_msg": "Wrong Answer",
        "code_answer": ["[1,0]", "[2,1]"],
        "expected_code_answer": ["[0,1]", "[1,2]"]
    }));

    let report = payload.into_report().expect("report");

    let case = report.failed_case().expect("failed case");
    assert_eq!(case.actual, "[1,0]\n[2,1]");
    assert_eq!(case.expected, "[0,1]\n[1,2]");
    assert_eq!(case.input, "");
}

/// **VALUE**: Verifies accepted metrics survive normalization and an
/// accepted report never carries a failing case.
#[test]
fn given_accepted_with_metrics_when_normalized_then_metrics_forwarded() {
    let payload = check(json!({
        "state": "SUCCESS",
        "status_msg": "Accepted",
        "status_runtime": "0 ms",
        "runtime_percentile": 100.0,
        "status_memory": "12.4 MB",
        "memory_percentile": "87.5",
        "expected_output": "[0,1]",
        "code_output": "[0,1]"
    }));

    let report = payload.into_report().expect("report");

    assert!(report.is_accepted());
    assert_eq!(report.runtime(), Some("0 ms"));
    assert_eq!(report.runtime_percentile(), Some(100.0));
    assert_eq!(report.memory_percentile(), Some(87.5));
    assert!(report.failed_case().is_none());
}

/// **VALUE**: Verifies inconsistent counts are dropped instead of failing
/// the whole report.
#[test]
fn given_passed_above_total_when_normalized_then_counts_dropped() {
    let payload = check(json!({ "status_msg": "Wrong Answer", "total_correct": 9, "total_testcases": 3 }));

    let report = payload.into_report().expect("report");

    assert_eq!(report.passed_count(), None);
    assert_eq!(report.total_count(), None);
}
