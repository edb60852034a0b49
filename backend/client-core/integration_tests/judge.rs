use crate::support::{RecordingSleeper, TEST_CSRF, TEST_SESSION, signed_in_config};

use client_core::config::{MemoryConfigStore, UserConfig};
use client_core::error::judge::{AUTH_FAILED_MESSAGE, JudgeError, NOT_LOGGED_IN_MESSAGE};
use client_core::judge::{JudgeClient, JudgeJob, MAX_POLL_ATTEMPTS, POLL_INTERVAL};

use models::JudgeOutcome;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for the judge client, against a mock judge
// ============================================================================

const SLUG: &str = "two-sum";
const JOB_ID: &str = "runcode_1700000000.123_abc";
const INTERPRET_PATH: &str = "/problems/two-sum/interpret_solution/";
const SUBMIT_PATH: &str = "/problems/two-sum/submit/";
const CHECK_PATH: &str = "/submissions/detail/runcode_1700000000.123_abc/check/";

fn client_for(
    server: &MockServer,
    config: UserConfig,
) -> (JudgeClient<RecordingSleeper>, RecordingSleeper) {
    let sleeper = RecordingSleeper::default();
    let client = JudgeClient::with_parts(
        &server.uri(),
        Arc::new(MemoryConfigStore::new(config)),
        sleeper.clone(),
    )
    .expect("client");
    (client, sleeper)
}

fn test_job() -> JudgeJob {
    JudgeJob::test(SLUG, "1", "class Solution: pass", "python3", "[2,7,11,15]\n9")
}

async fn mount_interpret_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "interpret_id": JOB_ID })))
        .mount(server)
        .await;
}

async fn check_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == CHECK_PATH)
        .count()
}

/// **VALUE**: Verifies the poll loop stops on the first terminal payload.
///
/// **WHY THIS MATTERS**: The judge answers `PENDING`/`STARTED` for a few
/// seconds before the verdict. Each extra poll costs a second of user time
/// and one request against a rate-limited API.
///
/// **BUG THIS CATCHES**: Would catch a loop that polls once more after the
/// verdict, or one that treats `PENDING` as terminal.
#[tokio::test]
async fn given_five_pending_polls_when_job_runs_then_sixth_poll_returns_verdict() {
    // GIVEN: A judge that is pending five times, then accepts
    let server = MockServer::start().await;
    mount_interpret_ok(&server).await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "PENDING" })))
        .up_to_n_times(5)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_msg": "Accepted",
            "status_runtime": "4 ms",
            "runtime_percentile": 97.5,
            "status_memory": "17.1 MB",
            "memory_percentile": "63.2",
            "total_correct": 3,
            "total_testcases": 3,
        })))
        .mount(&server)
        .await;
    let (client, sleeper) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let report = client.run_job(&test_job()).await.expect("report");

    // THEN: Six polls, five waits of one interval, accepted report
    assert_eq!(check_count(&server).await, 6);
    assert_eq!(sleeper.sleeps(), vec![POLL_INTERVAL; 5]);
    assert_eq!(report.outcome(), JudgeOutcome::Accepted);
    assert_eq!(report.runtime(), Some("4 ms"));
    assert_eq!(report.memory_percentile(), Some(63.2));
    assert_eq!(report.passed_count(), Some(3));
}

/// **VALUE**: Verifies the poll budget is exact and ends in `PollTimeout`.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one that polls 61 times, or a
/// loop that sleeps once more after the final poll.
#[tokio::test]
async fn given_judge_never_finishes_when_job_runs_then_times_out_after_budget() {
    // GIVEN: A judge that is always pending
    let server = MockServer::start().await;
    mount_interpret_ok(&server).await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "state": "STARTED" })))
        .mount(&server)
        .await;
    let (client, sleeper) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Exactly MAX_POLL_ATTEMPTS polls and one fewer waits
    match result {
        Err(e @ JudgeError::PollTimeout { .. }) => {
            assert!(matches!(e, JudgeError::PollTimeout { attempts, .. } if attempts == MAX_POLL_ATTEMPTS));
            assert_eq!(e.summary(), "Timed out waiting for the judge result");
        }
        other => panic!("expected poll timeout, got {other:?}"),
    }
    assert_eq!(check_count(&server).await, MAX_POLL_ATTEMPTS as usize);
    assert_eq!(sleeper.sleeps().len(), MAX_POLL_ATTEMPTS as usize - 1);
}

/// **VALUE**: Verifies submit uses the submit endpoint and classifies a
/// compile error ahead of the status text.
#[tokio::test]
async fn given_compile_error_when_submitting_then_report_is_compile_error() {
    // GIVEN: A judge that accepts the submission and reports a compile error
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUBMIT_PATH))
        .and(body_partial_json(json!({
            "judge_type": "large",
            "lang": "cpp",
            "question_id": "1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "submission_id": 987654 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submissions/detail/987654/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_msg": "Compile Error",
            "full_compile_error": "Line 3: expected ';' after expression",
        })))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());
    let job = JudgeJob::submit(SLUG, "1", "int main() { return 0 }", "cpp");

    // WHEN: Submitting
    let report = client.run_job(&job).await.expect("report");

    // THEN: Compile error with the compiler output
    assert_eq!(report.outcome(), JudgeOutcome::CompileError);
    assert_eq!(report.raw_status_text(), "Compile Error");
    assert_eq!(
        report.compile_error(),
        Some("Line 3: expected ';' after expression")
    );
}

/// **VALUE**: Verifies the session cookie and CSRF headers are sent.
///
/// **WHY THIS MATTERS**: The judge silently answers 403 without the CSRF
/// header, which users read as "my session expired".
#[tokio::test]
async fn given_stored_credentials_when_job_starts_then_auth_headers_sent() {
    // GIVEN: A judge that only answers when all auth headers are present
    let server = MockServer::start().await;
    let cookie = format!("LEETCODE_SESSION={TEST_SESSION}; csrftoken={TEST_CSRF}");
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .and(header("cookie", cookie.as_str()))
        .and(header("x-csrftoken", TEST_CSRF))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "interpret_id": JOB_ID })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_msg": "Wrong Answer",
            "input_formatted": "[3,2,4]\n6",
            "expected_code_answer": ["[1,2]"],
            "code_answer": ["[0,1]"],
        })))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let report = client.run_job(&test_job()).await.expect("report");

    // THEN: The request matched and the failed case was extracted
    assert_eq!(report.outcome(), JudgeOutcome::WrongAnswer);
    let case = report.failed_case().expect("failed case");
    assert_eq!(case.input, "[3,2,4]\n6");
    assert_eq!(case.expected, "[1,2]");
    assert_eq!(case.actual, "[0,1]");
}

/// **VALUE**: Verifies a missing session fails before any network traffic.
#[tokio::test]
async fn given_no_session_when_job_runs_then_auth_error_without_requests() {
    // GIVEN: A judge and a config with no session
    let server = MockServer::start().await;
    mount_interpret_ok(&server).await;
    let (client, _) = client_for(&server, UserConfig::default());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Auth error with the "not logged in" text, nothing sent
    match result {
        Err(e @ JudgeError::Auth { .. }) => assert_eq!(e.summary(), NOT_LOGGED_IN_MESSAGE),
        other => panic!("expected auth error, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

/// **VALUE**: Verifies 401/403 from the judge map to the auth error.
#[tokio::test]
async fn given_forbidden_when_job_starts_then_auth_error() {
    // GIVEN: A judge that rejects the session
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Auth error telling the user to refresh the session
    match result {
        Err(e @ JudgeError::Auth { .. }) => assert_eq!(e.summary(), AUTH_FAILED_MESSAGE),
        other => panic!("expected auth error, got {other:?}"),
    }
}

/// **VALUE**: Verifies judge refusals are passed through verbatim.
#[tokio::test]
async fn given_judge_refusal_when_job_starts_then_submit_error_with_message() {
    // GIVEN: A judge that refuses because of rate limiting
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "You have attempted to run code too soon. Please wait."
        })))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Submit error carrying the judge's text
    match result {
        Err(e @ JudgeError::Submit { .. }) => assert_eq!(
            e.summary(),
            "You have attempted to run code too soon. Please wait."
        ),
        other => panic!("expected submit error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_job_id_when_job_starts_then_submit_error() {
    // GIVEN: A judge that answers without an id
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Submit error naming the missing field
    match result {
        Err(e @ JudgeError::Submit { .. }) => {
            assert_eq!(e.summary(), "No interpret_id in response")
        }
        other => panic!("expected submit error, got {other:?}"),
    }
}

/// **VALUE**: Verifies a non-auth HTTP failure on start reports its status.
#[tokio::test]
async fn given_server_error_when_job_starts_then_request_failed_with_status() {
    // GIVEN: A judge failing with 500
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTERPRET_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (client, _) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let result = client.run_job(&test_job()).await;

    // THEN: Submit error with the status code
    match result {
        Err(e @ JudgeError::Submit { .. }) => assert_eq!(e.summary(), "Request failed: 500"),
        other => panic!("expected submit error, got {other:?}"),
    }
}

/// **VALUE**: Verifies transient poll failures count as pending attempts.
///
/// **BUG THIS CATCHES**: Would catch a loop that aborts the whole job on a
/// single 503 from an overloaded judge.
#[tokio::test]
async fn given_transient_poll_failures_when_job_runs_then_polling_continues() {
    // GIVEN: A check endpoint that fails twice with 503, then answers
    let server = MockServer::start().await;
    mount_interpret_ok(&server).await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHECK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "SUCCESS",
            "status_msg": "Time Limit Exceeded",
        })))
        .mount(&server)
        .await;
    let (client, sleeper) = client_for(&server, signed_in_config());

    // WHEN: Running a test job
    let report = client.run_job(&test_job()).await.expect("report");

    // THEN: The verdict arrives on the third poll
    assert_eq!(report.outcome(), JudgeOutcome::TimeLimitExceeded);
    assert_eq!(check_count(&server).await, 3);
    assert_eq!(sleeper.sleeps().len(), 2);
}

/// **VALUE**: Verifies slugs are checked before they reach a URL path.
///
/// **BUG THIS CATCHES**: Would catch `../` in a slug redirecting the request
/// to another judge endpoint.
#[tokio::test]
async fn given_path_traversal_slug_when_job_runs_then_rejected_without_requests() {
    // GIVEN: A hostile slug
    let server = MockServer::start().await;
    let (client, _) = client_for(&server, signed_in_config());
    let job = JudgeJob::submit("../../accounts/logout", "1", "x", "python3");

    // WHEN: Running the job
    let result = client.run_job(&job).await;

    // THEN: Rejected locally
    assert!(matches!(result, Err(JudgeError::Submit { .. })));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
