use leetcode_exporter::commands::CommandOutcome;
use leetcode_exporter::commands::judge::{JudgeMode, run};
use leetcode_exporter::error::CliError;

use client_core::config::{MemoryConfigStore, UserConfig};
use client_core::judge::{JudgeClient, Sleeper};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// `test` and `submit` from a problem folder, against a mock judge
// ============================================================================

const JOB_ID: &str = "runcode_42";
const CHECK_PATH: &str = "/submissions/detail/runcode_42/check/";

const SOLUTION: &str = r#""""
1. Two Sum

Test Cases:
Input: nums = [2,7,11,15], target = 9
Output: [0,1]
"""

class Solution:
    def twoSum(self, nums, target):
        pass
"#;

struct NoSleep;

impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}

fn client_for(server: &MockServer) -> JudgeClient<NoSleep> {
    let config = UserConfig {
        leetcode_session: Some(String::from("session")),
        leetcode_csrf: Some(String::from("csrf")),
        ..Default::default()
    };
    JudgeClient::with_parts(&server.uri(), Arc::new(MemoryConfigStore::new(config)), NoSleep)
        .unwrap()
}

fn problem_dir(root: &Path, name: &str, contents: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("solution.py"), contents).unwrap();
    dir
}

async fn mount_check(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn run_to_string(
    client: &JudgeClient<NoSleep>,
    mode: JudgeMode,
    target: &Path,
) -> (Result<CommandOutcome, CliError>, String) {
    let mut out = Vec::new();
    let result = run(client, mode, target, false, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

/// **VALUE**: Verifies `test` sends the folder's id and the parsed test input.
///
/// **WHY THIS MATTERS**: The judge runs whatever `data_input` says. Sending the
/// raw `nums = ...` line instead of bare values fails every test run.
///
/// **BUG THIS CATCHES**: Would catch the folder name not being parsed into the
/// question id, or assignments not being stripped.
#[tokio::test]
async fn given_problem_folder_when_tested_then_parsed_input_sent_and_accepted() {
    // GIVEN: A judge expecting the parsed request, then reporting Accepted
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/interpret_solution/"))
        .and(body_partial_json(json!({
            "question_id": "1",
            "data_input": "[2,7,11,15]\n9",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "interpret_id": JOB_ID })))
        .mount(&server)
        .await;
    mount_check(
        &server,
        json!({ "state": "SUCCESS", "status_msg": "Accepted", "status_runtime": "0 ms" }),
    )
    .await;
    let root = TempDir::new().unwrap();
    let dir = problem_dir(root.path(), "1-two-sum", SOLUTION);

    // WHEN
    let (result, output) = run_to_string(&client_for(&server), JudgeMode::Test, &dir).await;

    // THEN
    assert_eq!(result.unwrap(), CommandOutcome::Success);
    assert!(output.contains("Problem: two-sum (#1)"));
    assert!(output.contains("Running tests..."));
    assert!(output.contains("✓ Accepted"));
    assert!(output.contains("  Runtime: 0 ms"));
}

/// **VALUE**: Verifies a wrong answer exits as rejected and shows the case.
///
/// **BUG THIS CATCHES**: Would catch a non-accepted verdict exiting 0, which
/// breaks `leetcode-exporter submit && git commit`.
#[tokio::test]
async fn given_wrong_answer_when_submitted_then_rejected_with_failed_case() {
    // GIVEN
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/problems/two-sum/submit/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "submission_id": JOB_ID })))
        .mount(&server)
        .await;
    mount_check(
        &server,
        json!({
            "state": "SUCCESS",
            "status_msg": "Wrong Answer",
            "total_correct": 12,
            "total_testcases": 63,
            "last_testcase": "[3,2,4]\n6",
            "expected_output": "[1,2]",
            "code_output": "[0,0]",
        }),
    )
    .await;
    let root = TempDir::new().unwrap();
    let dir = problem_dir(root.path(), "1-two-sum", SOLUTION);

    // WHEN: Targeting the file directly
    let (result, output) =
        run_to_string(&client_for(&server), JudgeMode::Submit, &dir.join("solution.py")).await;

    // THEN
    assert_eq!(result.unwrap(), CommandOutcome::Rejected);
    assert!(output.contains("Submitting..."));
    assert!(output.contains("✗ Wrong Answer"));
    assert!(output.contains("  Tests: 12/63 passed"));
    assert!(output.contains("    Got: [0,0]"));
}

/// **VALUE**: Verifies a folder without an id fails before contacting the judge.
#[tokio::test]
async fn given_folder_without_id_when_submitted_then_error_and_no_requests() {
    // GIVEN
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let dir = problem_dir(root.path(), "two-sum", SOLUTION);

    // WHEN
    let (result, _) = run_to_string(&client_for(&server), JudgeMode::Submit, &dir).await;

    // THEN
    let err = result.unwrap_err();
    assert!(err.summary().starts_with("Cannot determine question ID"));
    assert!(err.hint().is_some());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn given_no_test_cases_when_tested_then_error_with_hint() {
    // GIVEN: A solution with no Input: line anywhere
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();
    let dir = problem_dir(root.path(), "1-two-sum", "class Solution:\n    pass\n");

    // WHEN
    let (result, _) = run_to_string(&client_for(&server), JudgeMode::Test, &dir).await;

    // THEN
    let err = result.unwrap_err();
    assert!(err.summary().starts_with("No test cases found"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn given_empty_folder_when_tested_then_not_found() {
    // GIVEN
    let server = MockServer::start().await;
    let root = TempDir::new().unwrap();

    // WHEN
    let (result, _) = run_to_string(&client_for(&server), JudgeMode::Test, root.path()).await;

    // THEN
    assert!(result.unwrap_err().summary().starts_with("No solution file found"));
}
