use client_core::ipc::framing::{self, decode_response, encode};
use client_core::{DEBUG_ENV_VAR, READ_WATCHDOG_ENV_VAR};

use models::{Request, Response};

use std::process::Stdio;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

// ============================================================================
// The host binary as the browser runs it: a child process on piped stdio
// ============================================================================

/// Generous upper bound for a host that should exit within milliseconds.
const EXIT_DEADLINE: Duration = Duration::from_secs(5);

fn spawn_host(home: &TempDir, read_watchdog_ms: &str) -> Child {
    Command::new(env!("CARGO_BIN_EXE_leetcode-exporter-host"))
        .arg("chrome-extension://abcdefghijklmnopabcdefghijklmnop/")
        .env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env(DEBUG_ENV_VAR, "0")
        .env(READ_WATCHDOG_ENV_VAR, read_watchdog_ms)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("spawn host")
}

async fn read_response(child: &mut Child) -> Response {
    let mut stdout = child.stdout.take().expect("stdout");
    let payload = framing::read_frame(&mut stdout).await.expect("response frame");
    decode_response(&payload).expect("response json")
}

/// **VALUE**: Verifies the host process exits once the read watchdog answers,
/// even though the browser never closes its end of stdin.
///
/// **WHY THIS MATTERS**: The browser keeps the pipe open until the host exits.
/// A host that waits for its stdin reader to finish lingers until the browser
/// gives up on it.
///
/// **BUG THIS CATCHES**: Would catch a runtime teardown that joins the blocked
/// stdin read, keeping the process alive long after its reply.
#[tokio::test]
async fn given_silent_open_stdin_when_watchdog_fires_then_process_exits() {
    // GIVEN: A host with a short read budget and a stdin we hold open
    let home = TempDir::new().expect("tempdir");
    let mut child = spawn_host(&home, "300");
    let stdin = child.stdin.take().expect("stdin");
    let spawned = Instant::now();

    // WHEN: Waiting for it without writing anything
    let response = read_response(&mut child).await;
    let status = tokio::time::timeout(EXIT_DEADLINE, child.wait())
        .await
        .expect("host must exit while stdin is still open")
        .expect("wait");

    // THEN: Timeout reply, failure exit, well before the deadline
    assert_eq!(response.error.as_deref(), Some("Timeout"));
    assert!(!response.success);
    assert_eq!(status.code(), Some(1));
    assert!(spawned.elapsed() < EXIT_DEADLINE);
    drop(stdin);
}

/// **VALUE**: Verifies a request written to the real binary is answered and
/// the process exits cleanly while stdin stays open.
#[tokio::test]
async fn given_get_config_when_sent_to_binary_then_answered_and_exits_zero() {
    // GIVEN: A host with a fresh home directory
    let home = TempDir::new().expect("tempdir");
    let mut child = spawn_host(&home, "5000");
    let mut stdin = child.stdin.take().expect("stdin");

    // WHEN: Writing one getConfig envelope, keeping the pipe open
    let frame = encode(&Request::GetConfig).expect("encode");
    stdin.write_all(&frame).await.expect("write request");
    stdin.flush().await.expect("flush");
    let response = read_response(&mut child).await;
    let status = tokio::time::timeout(EXIT_DEADLINE, child.wait())
        .await
        .expect("host must exit after answering")
        .expect("wait");

    // THEN: Default settings come back and the exit code is 0
    assert!(response.success);
    assert_eq!(response.config.expect("config").editor, "auto");
    assert_eq!(status.code(), Some(0));
    drop(stdin);
}
