// Unit tests for envelope decoding.
// Stream behavior (fragmentation, short reads) is in integration_tests/ipc.rs

use crate::error::ipc::IpcError;
use crate::ipc::framing::{HEADER_LEN, MAX_MESSAGE_BYTES, decode_request, encode};

use models::{Request, Response};

/// **VALUE**: Verifies malformed JSON is a framing error with the wire text
/// the extension already understands.
#[test]
fn given_invalid_json_when_decoded_then_returns_framing_error() {
    let result = decode_request(b"{not json");

    match result {
        Err(e @ IpcError::Framing { .. }) => assert_eq!(e.summary(), "Invalid JSON"),
        other => panic!("expected framing error, got {other:?}"),
    }
}

/// **VALUE**: Verifies unknown and missing actions are rejected distinctly
/// from malformed JSON.
///
/// **BUG THIS CATCHES**: Would catch a decoder that reports "Invalid JSON"
/// for a well-formed message from a newer extension, hiding the version skew.
#[test]
fn given_unknown_action_when_decoded_then_returns_unknown_action() {
    let unknown = decode_request(br#"{"action":"formatDisk"}"#);
    let missing = decode_request(br#"{"data":{}}"#);

    assert!(matches!(unknown, Err(IpcError::UnknownAction { ref action, .. }) if action == "formatDisk"));
    assert!(matches!(missing, Err(IpcError::UnknownAction { .. })));
}

/// **VALUE**: Verifies a known action with missing fields is an invalid request.
#[test]
fn given_known_action_missing_fields_when_decoded_then_returns_invalid_request() {
    let result = decode_request(br#"{"action":"setConfig","key":"editor"}"#);

    assert!(matches!(result, Err(IpcError::InvalidRequest { .. })));
}

/// **VALUE**: Verifies the header is computed from the encoded payload.
///
/// **WHY THIS MATTERS**: Multi-byte UTF-8 makes char count and byte count
/// differ. A char-count header truncates the message on the other side.
#[test]
fn given_non_ascii_message_when_encoded_then_header_counts_bytes() {
    let response = Response::failure("Ошибка: 文件");

    let frame = encode(&response).expect("encode");

    let length = u32::from_le_bytes(frame[..HEADER_LEN].try_into().expect("header"));
    assert_eq!(length as usize, frame.len() - HEADER_LEN);
    let decoded: Response = serde_json::from_slice(&frame[HEADER_LEN..]).expect("payload");
    assert_eq!(decoded, response);
}

/// **VALUE**: Verifies a request decodes from the exact bytes an encoder produced.
#[test]
fn given_encoded_request_when_decoded_then_matches() {
    let request = Request::SetConfig {
        key: String::from("workspaceDir"),
        value: String::from("/tmp/x"),
    };

    let frame = encode(&request).expect("encode");
    let decoded = decode_request(&frame[HEADER_LEN..]).expect("decode");

    assert_eq!(decoded, request);
}

/// **VALUE**: Verifies the outbound side enforces the same size cap as the
/// inbound side.
///
/// **BUG THIS CATCHES**: Would catch a writer that emits an envelope the
/// browser drops as oversized, leaving the caller with no response at all.
#[test]
fn given_payload_over_cap_when_encoded_then_framing_error() {
    // GIVEN: A response whose JSON is larger than the cap
    let response = Response::failure("x".repeat(MAX_MESSAGE_BYTES as usize + 1));

    // WHEN: Encoding
    let result = encode(&response);

    // THEN: Framing error naming the size
    match result {
        Err(e @ IpcError::Framing { .. }) => assert!(e.summary().contains("too large")),
        other => panic!("expected framing error, got {other:?}"),
    }
}
