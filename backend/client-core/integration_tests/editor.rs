use client_core::editor::{CommandRunner, LaunchDescriptor, ProcessRunner, launch_first};
use client_core::error::editor::EditorError;

use std::io::ErrorKind;

// ============================================================================
// Real process spawning (unix only: relies on `true` and `false` on PATH)
// ============================================================================

/// **VALUE**: Verifies exit codes and spawn failures are told apart.
///
/// **WHY THIS MATTERS**: The chain moves on for both, but a spawn failure is
/// the common case (editor not installed) and must not look like a crash.
#[cfg(unix)]
#[tokio::test]
async fn given_real_programs_when_run_then_exit_codes_reported() {
    // GIVEN: The process runner

    // WHEN: Running programs that succeed, fail and do not exist
    let ok = ProcessRunner.run("true", &[]).await;
    let failed = ProcessRunner.run("false", &[]).await;
    let missing = ProcessRunner
        .run("definitely-not-an-editor-4f2a", &[])
        .await;

    // THEN: Some(0), Some(nonzero) and NotFound
    assert_eq!(ok.expect("true"), Some(0));
    assert!(matches!(failed, Ok(Some(code)) if code != 0));
    assert_eq!(missing.expect_err("missing").kind(), ErrorKind::NotFound);
}

/// **VALUE**: Verifies the chain skips missing and failing programs.
#[cfg(unix)]
#[tokio::test]
async fn given_chain_with_missing_and_failing_entries_when_launched_then_first_success_wins() {
    // GIVEN: missing -> false -> true
    let chain = vec![
        LaunchDescriptor::new("definitely-not-an-editor-4f2a", ["{file}"]),
        LaunchDescriptor::new("false", Vec::<String>::new()),
        LaunchDescriptor::new("true", Vec::<String>::new()),
    ];

    // WHEN: Launching
    let launched = launch_first(&ProcessRunner, &chain, "/tmp/solution.py")
        .await
        .expect("launched");

    // THEN: The third entry opened it
    assert_eq!(launched.index, 2);
    assert_eq!(launched.program, "true");
}

#[cfg(unix)]
#[tokio::test]
async fn given_only_failing_entries_when_launched_then_not_found_lists_attempts() {
    // GIVEN: A chain where nothing works
    let chain = vec![
        LaunchDescriptor::new("definitely-not-an-editor-4f2a", ["{file}"]),
        LaunchDescriptor::new("false", Vec::<String>::new()),
    ];

    // WHEN: Launching
    let result = launch_first(&ProcessRunner, &chain, "/tmp/solution.py").await;

    // THEN: Every attempt is listed
    match result {
        Err(EditorError::NotFound { attempts, .. }) => {
            assert_eq!(attempts, vec!["definitely-not-an-editor-4f2a", "false"])
        }
        Ok(launched) => panic!("expected not found, got {launched:?}"),
    }
}
