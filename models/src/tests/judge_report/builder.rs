use crate::{FailedCase, JudgeOutcome, JudgeReportBuilder, ModelError};

/// **VALUE**: Verifies that a report cannot be built without a status text.
///
/// **WHY THIS MATTERS**: The raw status text is what the CLI prints when the
/// outcome is the generic `Unknown` class. An empty one leaves the user with
/// no idea what the judge said.
///
/// **BUG THIS CATCHES**: Would catch if the required-field check is dropped
/// during refactoring of the normalizer.
#[test]
fn given_missing_status_text_when_building_then_returns_validation_error() {
    // GIVEN: Builder with an outcome but no status text
    let builder = JudgeReportBuilder::default().with_outcome(JudgeOutcome::Unknown);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Status text is required");
        }
        Ok(report) => panic!("expected validation error, got {report:?}"),
    }
}

/// **VALUE**: Verifies that an accepted report never carries a failing case.
///
/// **BUG THIS CATCHES**: Would catch a normalizer that forwards stale
/// `expected_output` fields from an accepted submission as a failure.
#[test]
fn given_accepted_with_failed_case_when_building_then_returns_validation_error() {
    // GIVEN: Accepted outcome plus a failed case
    let builder = JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::Accepted)
        .with_raw_status_text("Accepted")
        .with_failed_case(Some(FailedCase {
            input: String::from("[1]"),
            expected: String::from("1"),
            actual: String::from("2"),
        }));

    // WHEN / THEN: Build fails
    assert!(builder.build().is_err());
}

/// **VALUE**: Verifies that inconsistent aggregate counts are rejected.
#[test]
fn given_passed_above_total_when_building_then_returns_validation_error() {
    let builder = JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::WrongAnswer)
        .with_raw_status_text("Wrong Answer")
        .with_counts(Some(12), Some(10));

    match builder.build() {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("exceeds total count"));
        }
        Ok(report) => panic!("expected validation error, got {report:?}"),
    }
}

/// **VALUE**: Verifies that a complete report exposes every forwarded field.
///
/// **BUG THIS CATCHES**: Would catch a builder that silently drops an
/// optional metric (e.g. memory percentile) on its way into the report.
#[test]
fn given_all_fields_when_building_then_accessors_return_them() {
    // GIVEN: A fully populated builder
    let report = JudgeReportBuilder::default()
        .with_outcome(JudgeOutcome::Accepted)
        .with_raw_status_text("Accepted")
        .with_runtime(Some(String::from("3 ms")))
        .with_runtime_percentile(Some(97.5))
        .with_memory(Some(String::from("42.1 MB")))
        .with_memory_percentile(Some(12.0))
        .with_counts(Some(63), Some(63))
        .build()
        .expect("report should build");

    // THEN: Accessors mirror the input
    assert!(report.is_accepted());
    assert_eq!(report.raw_status_text(), "Accepted");
    assert_eq!(report.runtime(), Some("3 ms"));
    assert_eq!(report.runtime_percentile(), Some(97.5));
    assert_eq!(report.memory(), Some("42.1 MB"));
    assert_eq!(report.memory_percentile(), Some(12.0));
    assert_eq!(report.passed_count(), Some(63));
    assert_eq!(report.total_count(), Some(63));
    assert!(report.failed_case().is_none());
}
