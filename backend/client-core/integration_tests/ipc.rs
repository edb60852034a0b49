use client_core::error::ipc::IpcError;
use client_core::ipc::framing::{self, HEADER_LEN, MAX_MESSAGE_BYTES, decode_request, encode};
use client_core::ipc::host::{HostExit, JUDGE_WATCHDOG, READ_WATCHDOG, Watchdogs, run_host};
use client_core::ipc::RequestHandler;

use models::{ProblemRecord, Request, Response, TestCase};

use std::time::Duration;

use proptest::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};
use tokio::time::Instant;

// ============================================================================
// Envelope transport and the single-request host lifecycle over in-memory pipes
// ============================================================================

/// Answers after a fixed delay; the delay is measured on tokio's clock.
struct SlowHandler {
    delay: Duration,
}

impl RequestHandler for SlowHandler {
    async fn handle(&self, request: Request) -> Response {
        tokio::time::sleep(self.delay).await;
        Response::ok().with_hint(request.action())
    }
}

fn instant_handler() -> SlowHandler {
    SlowHandler {
        delay: Duration::ZERO,
    }
}

fn judge_request() -> Request {
    Request::TestSolution {
        slug: String::from("two-sum"),
        question_id: String::from("1"),
        code: String::from("pass"),
        language: String::from("python3"),
        test_cases: String::from("[1]\n1"),
    }
}

/// Run the host against `input`, returning its exit and every byte it wrote.
async fn run_with_input(input: &[u8], handler: &SlowHandler) -> (HostExit, Vec<u8>) {
    let (mut browser_in, mut host_in) = duplex(64 * 1024);
    let (mut host_out, mut browser_out) = duplex(64 * 1024);
    browser_in.write_all(input).await.expect("write request");

    let exit = run_host(&mut host_in, &mut host_out, handler, Instant::now(), Watchdogs::default()).await;
    drop(host_out);

    let mut written = Vec::new();
    browser_out
        .read_to_end(&mut written)
        .await
        .expect("read response");
    drop(browser_in);
    (exit, written)
}

fn single_response(bytes: &[u8]) -> Response {
    let length = u32::from_le_bytes(bytes[..HEADER_LEN].try_into().expect("header")) as usize;
    assert_eq!(
        bytes.len(),
        HEADER_LEN + length,
        "host must write exactly one envelope"
    );
    serde_json::from_slice(&bytes[HEADER_LEN..]).expect("response json")
}

// ----------------------------------------------------------------------------
// Framing over a stream
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies a message delivered in tiny fragments is reassembled.
///
/// **WHY THIS MATTERS**: Pipes deliver whatever the kernel has buffered. A
/// reader that assumes one read per message works in tests and fails under load.
///
/// **BUG THIS CATCHES**: Would catch a single `read()` instead of `read_exact()`.
#[tokio::test]
async fn given_fragmented_delivery_when_received_then_message_reassembled() {
    // GIVEN: A request split into 3-byte chunks with yields between them
    let request = Request::SetConfig {
        key: String::from("editor"),
        value: String::from("nvim"),
    };
    let frame = encode(&request).expect("encode");
    let (mut writer, mut reader) = duplex(8);
    let sender = tokio::spawn(async move {
        for chunk in frame.chunks(3) {
            writer.write_all(chunk).await.expect("chunk");
            tokio::task::yield_now().await;
        }
        writer
    });

    // WHEN: Receiving
    let received = framing::receive(&mut reader).await.expect("receive");

    // THEN: The full request arrives intact
    assert_eq!(received, request);
    drop(sender.await.expect("sender"));
}

/// **VALUE**: Verifies a reader waits for the full payload instead of
/// decoding a prefix.
#[tokio::test(start_paused = true)]
async fn given_partial_payload_when_received_then_waits_for_the_rest() {
    // GIVEN: A header announcing 100 bytes followed by only 10, writer still open
    let (mut writer, mut reader) = duplex(1024);
    writer.write_all(&100u32.to_le_bytes()).await.expect("header");
    writer.write_all(&[b' '; 10]).await.expect("partial");

    // WHEN: Receiving with a deadline
    let result = tokio::time::timeout(Duration::from_secs(5), framing::read_frame(&mut reader)).await;

    // THEN: Still waiting when the deadline passes
    assert!(result.is_err(), "reader must not return a short frame");
    drop(writer);
}

/// **VALUE**: Verifies a stream closed mid-message is a framing error.
#[tokio::test]
async fn given_stream_closed_mid_payload_when_received_then_framing_error() {
    // GIVEN: A header announcing 100 bytes, 10 bytes, then EOF
    let (mut writer, mut reader) = duplex(1024);
    writer.write_all(&100u32.to_le_bytes()).await.expect("header");
    writer.write_all(&[b' '; 10]).await.expect("partial");
    drop(writer);

    // WHEN: Receiving
    let result = framing::read_frame(&mut reader).await;

    // THEN: Framing error, not a truncated payload
    assert!(matches!(result, Err(IpcError::Framing { .. })));
}

/// **VALUE**: Verifies the inbound size cap is enforced from the header alone.
///
/// **BUG THIS CATCHES**: Would catch a reader that allocates whatever a
/// corrupt header claims before checking it.
#[tokio::test]
async fn given_oversized_header_when_received_then_rejected_before_payload() {
    // GIVEN: A header one byte over the cap and no payload
    let (mut writer, mut reader) = duplex(64);
    writer
        .write_all(&(MAX_MESSAGE_BYTES + 1).to_le_bytes())
        .await
        .expect("header");

    // WHEN: Receiving
    let result = framing::read_frame(&mut reader).await;

    // THEN: Framing error naming the size
    match result {
        Err(e @ IpcError::Framing { .. }) => assert!(e.summary().contains("too large")),
        other => panic!("expected framing error, got {other:?}"),
    }
    drop(writer);
}

// ----------------------------------------------------------------------------
// Host lifecycle
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies one request produces exactly one response envelope.
#[tokio::test]
async fn given_valid_request_when_host_runs_then_writes_one_response() {
    // GIVEN: A framed getConfig request
    let frame = encode(&Request::GetConfig).expect("encode");

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &instant_handler()).await;

    // THEN: One success envelope and exit code 0
    let response = single_response(&written);
    assert!(response.success);
    assert_eq!(response.hint.as_deref(), Some("getConfig"));
    assert_eq!(exit, HostExit::Completed);
    assert_eq!(exit.code(), 0);
}

/// **VALUE**: Verifies malformed JSON yields `Invalid JSON` and exit code 1.
///
/// **WHY THIS MATTERS**: The extension shows `error` to the user; any other
/// text for this case breaks its existing error mapping.
#[tokio::test]
async fn given_invalid_json_when_host_runs_then_invalid_json_and_exit_one() {
    // GIVEN: A well-framed payload that is not JSON
    let payload = b"{\"action\": ";
    let mut frame = (payload.len() as u32).to_le_bytes().to_vec();
    frame.extend_from_slice(payload);

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &instant_handler()).await;

    // THEN: Failure envelope with the fixed text
    let response = single_response(&written);
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Invalid JSON"));
    assert_eq!(exit, HostExit::Rejected);
    assert_eq!(exit.code(), 1);
}

/// **VALUE**: Verifies an unknown action is answered, not treated as corruption.
#[tokio::test]
async fn given_unknown_action_when_host_runs_then_invalid_action_and_exit_zero() {
    // GIVEN: A request naming an action the host does not serve
    let frame = encode(&serde_json::json!({ "action": "deleteEverything" })).expect("encode");

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &instant_handler()).await;

    // THEN: Structured failure, normal exit
    let response = single_response(&written);
    assert_eq!(
        response.error.as_deref(),
        Some("Invalid action: deleteEverything")
    );
    assert!(response.hint.is_some());
    assert_eq!(exit, HostExit::Completed);
}

/// **VALUE**: Verifies the read watchdog answers when no request arrives.
///
/// **BUG THIS CATCHES**: Would catch a host that blocks forever on a browser
/// that opened the pipe and never wrote, leaving an orphan process.
#[tokio::test(start_paused = true)]
async fn given_no_request_when_watchdog_fires_then_timeout_response() {
    // GIVEN: An open but silent input pipe
    let (browser_in, mut host_in) = duplex(1024);
    let (mut host_out, mut browser_out) = duplex(1024);
    let started = Instant::now();

    // WHEN: Running the host
    let exit = run_host(
        &mut host_in,
        &mut host_out,
        &instant_handler(),
        started,
        Watchdogs::default(),
    )
    .await;

    // THEN: Timeout envelope after the read budget
    assert_eq!(exit, HostExit::TimedOut);
    assert!(started.elapsed() >= READ_WATCHDOG);
    let response: Response = framing::read_frame(&mut browser_out)
        .await
        .map(|payload| serde_json::from_slice(&payload).expect("json"))
        .expect("response");
    assert_eq!(response.error.as_deref(), Some("Timeout"));
    drop(browser_in);
}

/// **VALUE**: Verifies a shortened read budget answers at that budget, not
/// at the default one.
#[tokio::test(start_paused = true)]
async fn given_short_read_budget_when_no_request_then_times_out_at_that_budget() {
    // GIVEN: A silent pipe and a 300 ms read budget
    let (browser_in, mut host_in) = duplex(1024);
    let (mut host_out, browser_out) = duplex(1024);
    let watchdogs = Watchdogs {
        read: Duration::from_millis(300),
        ..Watchdogs::default()
    };
    let started = Instant::now();

    // WHEN: Running the host
    let exit = run_host(
        &mut host_in,
        &mut host_out,
        &instant_handler(),
        started,
        watchdogs,
    )
    .await;

    // THEN: Timed out after the short budget and well before the default one
    assert_eq!(exit, HostExit::TimedOut);
    assert!(started.elapsed() >= watchdogs.read);
    assert!(started.elapsed() < READ_WATCHDOG);
    drop((browser_in, browser_out));
}

/// **VALUE**: Verifies judge jobs get the long budget and everything else the
/// read budget.
#[test]
fn given_requests_when_budgeted_then_judge_jobs_get_the_long_budget() {
    let watchdogs = Watchdogs::default();

    assert_eq!(watchdogs.budget_for(&judge_request()), JUDGE_WATCHDOG);
    assert_eq!(watchdogs.budget_for(&Request::GetConfig), READ_WATCHDOG);
}

/// **VALUE**: Verifies quick actions are bounded by the short watchdog.
#[tokio::test(start_paused = true)]
async fn given_slow_quick_action_when_host_runs_then_times_out() {
    // GIVEN: A handler slower than the quick budget
    let frame = encode(&Request::GetConfig).expect("encode");
    let handler = SlowHandler {
        delay: READ_WATCHDOG * 2,
    };

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &handler).await;

    // THEN: Exactly one timeout envelope
    let response = single_response(&written);
    assert_eq!(response.error.as_deref(), Some("Timeout"));
    assert_eq!(exit, HostExit::TimedOut);
}

/// **VALUE**: Verifies judge jobs get the long watchdog.
///
/// **WHY THIS MATTERS**: A submission routinely takes 10-30 s to judge. The
/// quick budget would kill every real submission.
#[tokio::test(start_paused = true)]
async fn given_judge_job_slower_than_quick_budget_when_host_runs_then_completes() {
    // GIVEN: A judge job that takes longer than the quick budget
    let frame = encode(&judge_request()).expect("encode");
    let handler = SlowHandler {
        delay: READ_WATCHDOG * 3,
    };

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &handler).await;

    // THEN: The handler's answer is delivered
    let response = single_response(&written);
    assert!(response.success);
    assert_eq!(exit, HostExit::Completed);
}

#[tokio::test(start_paused = true)]
async fn given_judge_job_slower_than_judge_budget_when_host_runs_then_times_out() {
    // GIVEN: A judge job that never finishes in time
    let frame = encode(&judge_request()).expect("encode");
    let handler = SlowHandler {
        delay: JUDGE_WATCHDOG + Duration::from_secs(1),
    };

    // WHEN: Running the host
    let (exit, written) = run_with_input(&frame, &handler).await;

    // THEN: Timeout envelope
    let response = single_response(&written);
    assert_eq!(response.error.as_deref(), Some("Timeout"));
    assert_eq!(exit, HostExit::TimedOut);
}

// ----------------------------------------------------------------------------
// Envelope properties
// ----------------------------------------------------------------------------

fn slug_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,40}"
}

fn record_strategy() -> impl Strategy<Value = ProblemRecord> {
    (
        proptest::option::of("[0-9]{1,5}"),
        proptest::option::of(any::<String>()),
        proptest::option::of(slug_strategy()),
        proptest::option::of(any::<String>()),
        proptest::collection::vec((any::<String>(), any::<String>()), 0..3),
    )
        .prop_map(|(id, title, slug, code, examples)| ProblemRecord {
            id,
            title,
            slug,
            code,
            examples: examples
                .into_iter()
                .map(|(input, output)| TestCase {
                    input,
                    output,
                    explanation: None,
                })
                .collect(),
            ..Default::default()
        })
}

fn request_strategy() -> impl Strategy<Value = Request> {
    prop_oneof![
        Just(Request::GetConfig),
        record_strategy().prop_map(|data| Request::OpenProblem { data }),
        (any::<String>(), any::<String>()).prop_map(|(key, value)| Request::SetConfig { key, value }),
        (slug_strategy(), "[0-9]{1,5}", any::<String>(), "[a-z]{1,10}", any::<String>()).prop_map(
            |(slug, question_id, code, language, test_cases)| Request::TestSolution {
                slug,
                question_id,
                code,
                language,
                test_cases,
            }
        ),
        (slug_strategy(), "[0-9]{1,5}", any::<String>(), "[a-z]{1,10}").prop_map(
            |(slug, question_id, code, language)| Request::SubmitSolution {
                slug,
                question_id,
                code,
                language,
            }
        ),
    ]
}

proptest! {
    /// **VALUE**: Any request survives encode then decode, with a header
    /// equal to the payload's byte length.
    #[test]
    fn prop_encoded_request_decodes_to_itself(request in request_strategy()) {
        let frame = encode(&request).expect("encode");
        let length = u32::from_le_bytes(frame[..HEADER_LEN].try_into().expect("header"));

        prop_assert_eq!(length as usize, frame.len() - HEADER_LEN);
        prop_assert_eq!(decode_request(&frame[HEADER_LEN..]).expect("decode"), request);
    }
}
