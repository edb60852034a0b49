use leetcode_exporter::commands::CommandOutcome;
use leetcode_exporter::commands::send::run;

use client_core::error::relay::RelayError;
use client_core::ipc::Transport;

use models::{Request, Response};

use std::sync::Mutex;

use serde_json::Value;

// ============================================================================
// `send`: one request through a transport, response printed as JSON
// ============================================================================

const CALLER_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

struct FakeTransport {
    outcome: fn() -> Result<Response, RelayError>,
    seen: Mutex<Vec<Request>>,
}

impl FakeTransport {
    fn new(outcome: fn() -> Result<Response, RelayError>) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for FakeTransport {
    async fn exchange(&self, _caller_id: &str, request: &Request) -> Result<Response, RelayError> {
        self.seen.lock().expect("lock").push(request.clone());
        (self.outcome)()
    }
}

async fn send(transport: &FakeTransport, json: &str) -> (CommandOutcome, Value) {
    let mut out = Vec::new();
    let outcome = run(transport, CALLER_ID, json, &mut out).await.unwrap();
    (outcome, serde_json::from_slice(&out).unwrap())
}

/// **VALUE**: Verifies a valid request is relayed and the answer printed.
#[tokio::test]
async fn given_valid_request_when_sent_then_host_response_printed() {
    // GIVEN
    let transport = FakeTransport::new(|| Ok(Response::ok().with_editor("code")));

    // WHEN
    let (outcome, printed) = send(&transport, r#"{"action":"getConfig"}"#).await;

    // THEN
    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(printed["success"], Value::Bool(true));
    assert_eq!(printed["editor"], Value::String(String::from("code")));
    assert_eq!(*transport.seen.lock().unwrap(), vec![Request::GetConfig]);
}

/// **VALUE**: Verifies malformed JSON is answered locally, like the host would.
///
/// **BUG THIS CATCHES**: Would catch a parse failure spawning the host anyway.
#[tokio::test]
async fn given_invalid_json_when_sent_then_failure_and_nothing_relayed() {
    // GIVEN
    let transport = FakeTransport::new(|| Ok(Response::ok()));

    // WHEN
    let (outcome, printed) = send(&transport, "{ not json").await;

    // THEN
    assert_eq!(outcome, CommandOutcome::Rejected);
    assert_eq!(printed["success"], Value::Bool(false));
    assert_eq!(printed["error"], Value::String(String::from("Invalid JSON")));
    assert!(transport.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_unknown_action_when_sent_then_invalid_action() {
    // GIVEN
    let transport = FakeTransport::new(|| Ok(Response::ok()));

    // WHEN
    let (outcome, printed) = send(&transport, r#"{"action":"deleteEverything"}"#).await;

    // THEN
    assert_eq!(outcome, CommandOutcome::Rejected);
    assert_eq!(
        printed["error"],
        Value::String(String::from("Invalid action: deleteEverything"))
    );
}

/// **VALUE**: Verifies an access-denied relay prints the register hint.
///
/// **WHY THIS MATTERS**: This is how users debug "the extension does nothing".
#[tokio::test]
async fn given_access_denied_when_sent_then_register_hint_printed() {
    // GIVEN
    let transport = FakeTransport::new(|| Err(RelayError::access_denied(CALLER_ID)));

    // WHEN
    let (outcome, printed) = send(&transport, r#"{"action":"getConfig"}"#).await;

    // THEN
    assert_eq!(outcome, CommandOutcome::Rejected);
    let hint = printed["hint"].as_str().unwrap();
    assert!(hint.contains(&format!("register {CALLER_ID}")));
}
