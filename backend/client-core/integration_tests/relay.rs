use client_core::error::relay::{DEFAULT_RELAY_HINT, RelayError};
use client_core::ipc::{ProcessTransport, Transport, relay};
use client_core::manifest::{HostManifest, origin_for};

use models::{Request, Response};

use std::sync::Mutex;

use tempfile::TempDir;

// ============================================================================
// Caller side of the channel
// ============================================================================

const CALLER_ID: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// Returns a canned outcome and records what it was asked to deliver.
struct FakeTransport {
    outcome: fn(&str) -> Result<Response, RelayError>,
    seen: Mutex<Vec<(String, Request)>>,
}

impl FakeTransport {
    fn new(outcome: fn(&str) -> Result<Response, RelayError>) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for FakeTransport {
    async fn exchange(&self, caller_id: &str, request: &Request) -> Result<Response, RelayError> {
        self.seen
            .lock()
            .expect("lock")
            .push((caller_id.to_string(), request.clone()));
        (self.outcome)(caller_id)
    }
}

/// **VALUE**: Verifies the host's response is passed through untouched.
#[tokio::test]
async fn given_host_answers_when_relayed_then_response_unchanged() {
    // GIVEN: A transport whose host answers with a file path
    let transport = FakeTransport::new(|_| Ok(Response::ok().with_file_path("/w/1-two-sum/solution.py")));

    // WHEN: Relaying
    let response = relay(&transport, CALLER_ID, &Request::GetConfig).await;

    // THEN: Same response, request forwarded once
    assert!(response.success);
    assert_eq!(response.file_path.as_deref(), Some("/w/1-two-sum/solution.py"));
    let seen = transport.seen.lock().expect("lock").clone();
    assert_eq!(seen, vec![(CALLER_ID.to_string(), Request::GetConfig)]);
}

/// **VALUE**: Verifies an access denial carries the caller id and the
/// command that fixes it.
///
/// **WHY THIS MATTERS**: The popup turns `extensionId` into a copyable
/// `register` command. Without it the user has to dig the id out of
/// chrome://extensions.
#[tokio::test]
async fn given_access_denied_when_relayed_then_hint_and_extension_id() {
    // GIVEN: A transport that refuses the caller
    let transport = FakeTransport::new(|id| Err(RelayError::access_denied(id)));

    // WHEN: Relaying
    let response = relay(&transport, CALLER_ID, &Request::GetConfig).await;

    // THEN: Structured failure naming the fix
    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Access to the specified native messaging host is forbidden.")
    );
    assert_eq!(
        response.hint.as_deref(),
        Some(format!("Run this command to register: leetcode-exporter register {CALLER_ID}").as_str())
    );
    assert_eq!(response.extension_id.as_deref(), Some(CALLER_ID));
}

#[tokio::test]
async fn given_unreachable_host_when_relayed_then_default_hint_without_id() {
    // GIVEN: A transport whose host cannot be reached
    let transport = FakeTransport::new(|_| Err(RelayError::unreachable("Native host has exited.")));

    // WHEN: Relaying
    let response = relay(&transport, CALLER_ID, &Request::GetConfig).await;

    // THEN: Setup hint, no extension id
    assert_eq!(response.error.as_deref(), Some("Native host has exited."));
    assert_eq!(response.hint.as_deref(), Some(DEFAULT_RELAY_HINT));
    assert!(response.extension_id.is_none());
}

/// **VALUE**: Verifies the process transport enforces `allowed_origins`
/// before spawning anything.
///
/// **BUG THIS CATCHES**: Would catch a relay that starts the host for any
/// caller, bypassing the registration step.
#[tokio::test]
async fn given_caller_not_in_manifest_when_exchanged_then_access_denied() {
    // GIVEN: A descriptor allowing a different extension
    let dir = TempDir::new().expect("tempdir");
    let mut manifest = HostManifest::new(dir.path().join("host"));
    manifest.allowed_origins = vec![origin_for("cccccccccccccccccccccccccccccccc")];
    let transport = ProcessTransport::new(manifest);

    // WHEN: Exchanging as an unlisted caller
    let result = transport.exchange(CALLER_ID, &Request::GetConfig).await;

    // THEN: Denied before any spawn attempt
    assert!(matches!(result, Err(RelayError::AccessDenied { .. })));
}

/// **VALUE**: Verifies a missing host binary is reported as unreachable.
#[tokio::test]
async fn given_missing_host_binary_when_exchanged_then_unreachable() {
    // GIVEN: An allowed caller and a host path that does not exist
    let dir = TempDir::new().expect("tempdir");
    let mut manifest = HostManifest::new(dir.path().join("no-such-host"));
    manifest.allowed_origins = vec![origin_for(CALLER_ID)];
    let transport = ProcessTransport::new(manifest);

    // WHEN: Relaying
    let response = relay(&transport, CALLER_ID, &Request::GetConfig).await;

    // THEN: Failure with the setup hint
    assert!(!response.success);
    assert!(
        response
            .error
            .as_deref()
            .is_some_and(|e| e.contains("not found"))
    );
    assert_eq!(response.hint.as_deref(), Some(DEFAULT_RELAY_HINT));
}
