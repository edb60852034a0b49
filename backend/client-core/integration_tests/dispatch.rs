use crate::support::{RecordingSleeper, ScriptedRunner, signed_in_config};

use client_core::config::{ConfigStore, MemoryConfigStore, UserConfig};
use client_core::error::editor::EDITOR_NOT_FOUND_HINT;
use client_core::error::judge::NOT_LOGGED_IN_MESSAGE;
use client_core::ipc::Dispatcher;
use client_core::judge::JudgeClient;

use models::{JudgeOutcome, ProblemRecord, Request, TestCase};

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Request routing inside the host
// ============================================================================

fn build_dispatcher(
    config: UserConfig,
    judge_url: &str,
    runner: ScriptedRunner,
) -> (Dispatcher<ScriptedRunner, RecordingSleeper>, Arc<MemoryConfigStore>) {
    let store = Arc::new(MemoryConfigStore::new(config));
    let judge = JudgeClient::with_parts(judge_url, store.clone(), RecordingSleeper::default())
        .expect("judge client");
    (Dispatcher::with_parts(store.clone(), judge, runner), store)
}

fn config_with_workspace(dir: &TempDir) -> UserConfig {
    UserConfig {
        workspace_dir: dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    }
}

fn two_sum() -> ProblemRecord {
    ProblemRecord {
        id: Some(String::from("1")),
        title: Some(String::from("Two Sum")),
        slug: Some(String::from("two-sum")),
        description: Some(String::from("<p>Find two numbers.</p>")),
        difficulty: Some(String::from("Easy")),
        code: Some(String::from("def two_sum(nums, target):\n    pass\n")),
        language: Some(String::from("python3")),
        examples: vec![TestCase {
            input: String::from("nums = [2,7,11,15], target = 9"),
            output: String::from("[0,1]"),
            explanation: None,
        }],
        url: None,
    }
}

const UNUSED_JUDGE: &str = "http://127.0.0.1:9";

/// **VALUE**: Verifies `openProblem` writes the file and reports the editor.
///
/// **WHY THIS MATTERS**: This is the extension's main button. The response's
/// `filePath` is what the popup shows the user.
#[tokio::test]
async fn given_problem_when_opened_then_file_written_and_editor_reported() {
    // GIVEN: A workspace and a machine where only `code` works
    let dir = TempDir::new().expect("tempdir");
    let runner = ScriptedRunner::default().with_exit("code", 0);
    let (dispatcher, _) = build_dispatcher(config_with_workspace(&dir), UNUSED_JUDGE, runner);

    // WHEN: Opening the problem
    let response = dispatcher
        .dispatch(Request::OpenProblem { data: two_sum() })
        .await;

    // THEN: Success with the written path and the editor that opened it
    assert!(response.success, "{response:?}");
    let expected = dir.path().join("1-two-sum").join("solution.py");
    assert_eq!(
        response.file_path.as_deref(),
        expected.to_str()
    );
    assert_eq!(response.editor_name(), Some("code"));
    let content = std::fs::read_to_string(expected).expect("solution file");
    assert!(content.contains(" * Problem: Two Sum"));
    assert!(content.contains("def two_sum(nums, target):"));
}

/// **VALUE**: Verifies a missing editor still reports the written file.
///
/// **BUG THIS CATCHES**: Would catch a handler that turns "no editor found"
/// into a failure, leaving the user without the path of a file that exists.
#[tokio::test]
async fn given_no_editor_when_opened_then_success_with_hint_and_null_editor() {
    // GIVEN: A machine with none of the chain's programs
    let dir = TempDir::new().expect("tempdir");
    let (dispatcher, _) = build_dispatcher(
        config_with_workspace(&dir),
        UNUSED_JUDGE,
        ScriptedRunner::default(),
    );

    // WHEN: Opening the problem
    let response = dispatcher
        .dispatch(Request::OpenProblem { data: two_sum() })
        .await;

    // THEN: Success, path present, editor reported as null on the wire
    assert!(response.success);
    assert!(response.file_path.is_some());
    assert_eq!(response.hint.as_deref(), Some(EDITOR_NOT_FOUND_HINT));
    assert_eq!(response.editor_name(), None);
    let wire = serde_json::to_value(&response).expect("json");
    assert_eq!(wire.get("editor"), Some(&serde_json::Value::Null));
}

/// **VALUE**: Verifies a configured editor is tried before the defaults.
#[tokio::test]
async fn given_configured_editor_when_opened_then_tried_first() {
    // GIVEN: editor = "subl" and a machine where it works
    let dir = TempDir::new().expect("tempdir");
    let mut config = config_with_workspace(&dir);
    config.editor = String::from("subl");
    let runner = ScriptedRunner::default()
        .with_exit("subl", 0)
        .with_exit("code", 0);
    let (dispatcher, _) = build_dispatcher(config, UNUSED_JUDGE, runner);

    // WHEN: Opening the problem
    let response = dispatcher
        .dispatch(Request::OpenProblem { data: two_sum() })
        .await;

    // THEN: The configured editor opened it
    assert_eq!(response.editor_name(), Some("subl"));
}

#[tokio::test]
async fn given_record_without_slug_or_title_when_opened_then_failure() {
    // GIVEN: An empty record
    let dir = TempDir::new().expect("tempdir");
    let (dispatcher, _) = build_dispatcher(
        config_with_workspace(&dir),
        UNUSED_JUDGE,
        ScriptedRunner::default(),
    );

    // WHEN: Opening it
    let response = dispatcher
        .dispatch(Request::OpenProblem {
            data: ProblemRecord::default(),
        })
        .await;

    // THEN: Failure, nothing written
    assert!(!response.success);
    assert!(response.error.is_some());
    assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
}

/// **VALUE**: Verifies `setConfig` persists and `getConfig` reflects it.
#[tokio::test]
async fn given_set_config_when_get_config_then_value_visible() {
    // GIVEN: A dispatcher over an in-memory store
    let (dispatcher, store) = build_dispatcher(
        UserConfig::default(),
        UNUSED_JUDGE,
        ScriptedRunner::default(),
    );

    // WHEN: Setting the editor, then reading settings
    let set = dispatcher
        .dispatch(Request::SetConfig {
            key: String::from("editor"),
            value: String::from("vim"),
        })
        .await;
    let get = dispatcher.dispatch(Request::GetConfig).await;

    // THEN: Both responses show the new value, the store holds it
    assert!(set.success);
    assert_eq!(set.config.expect("config").editor, "vim");
    assert_eq!(get.config.expect("config").editor, "vim");
    assert_eq!(store.load().expect("load").editor, "vim");
}

/// **VALUE**: Verifies the session secret is never returned by `getConfig`.
#[tokio::test]
async fn given_stored_session_when_get_config_then_only_flags_returned() {
    // GIVEN: A signed-in config
    let (dispatcher, _) = build_dispatcher(signed_in_config(), UNUSED_JUDGE, ScriptedRunner::default());

    // WHEN: Reading settings
    let response = dispatcher.dispatch(Request::GetConfig).await;

    // THEN: Flags only
    let wire = serde_json::to_string(&response).expect("json");
    assert!(wire.contains("\"hasSession\":true"));
    assert!(wire.contains("\"hasCsrf\":true"));
    assert!(!wire.contains("session-cookie-value"));
}

/// **VALUE**: Verifies judge jobs return the normalized report.
#[tokio::test]
async fn given_submit_request_when_dispatched_then_report_returned() {
    // GIVEN: A judge that accepts immediately
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "submission_id": 42 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/42/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_msg": "Accepted",
            "total_correct": 63,
            "total_testcases": 63,
        })))
        .mount(&server)
        .await;
    let (dispatcher, _) = build_dispatcher(signed_in_config(), &server.uri(), ScriptedRunner::default());

    // WHEN: Submitting
    let response = dispatcher
        .dispatch(Request::SubmitSolution {
            slug: String::from("two-sum"),
            question_id: String::from("1"),
            code: String::from("pass"),
            language: String::from("python3"),
        })
        .await;

    // THEN: Success with an accepted report
    assert!(response.success);
    let report = response.report.expect("report");
    assert_eq!(report.outcome(), JudgeOutcome::Accepted);
    assert_eq!(report.total_count(), Some(63));
}

/// **VALUE**: Verifies judge failures become structured failures with a hint.
#[tokio::test]
async fn given_no_session_when_test_dispatched_then_failure_with_hint() {
    // GIVEN: No stored session
    let (dispatcher, _) = build_dispatcher(
        UserConfig::default(),
        UNUSED_JUDGE,
        ScriptedRunner::default(),
    );

    // WHEN: Testing a solution
    let response = dispatcher
        .dispatch(Request::TestSolution {
            slug: String::from("two-sum"),
            question_id: String::from("1"),
            code: String::from("pass"),
            language: String::from("python3"),
            test_cases: String::from("[1]\n1"),
        })
        .await;

    // THEN: Failure with the login text and a hint
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(NOT_LOGGED_IN_MESSAGE));
    assert!(response.hint.is_some());
}
