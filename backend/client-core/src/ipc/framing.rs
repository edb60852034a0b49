//! Length-prefixed JSON envelopes.

use crate::error::ipc::{INVALID_JSON_MESSAGE, IpcError};

use common::ErrorLocation;
use models::{Request, Response};

use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;

use bytes::{Bytes, BytesMut};
use futures_util::{SinkExt, StreamExt};
use log::{debug, trace};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Encoder, FramedRead, FramedWrite, LengthDelimitedCodec};

pub const HEADER_LEN: usize = 4;

/// Largest payload accepted from the browser (its host-bound message limit).
pub const MAX_MESSAGE_BYTES: u32 = 1024 * 1024;

const STREAM_CLOSED_MESSAGE: &str = "Stream closed before a complete message arrived";

const KNOWN_ACTIONS: [&str; 5] = [
    "openProblem",
    "getConfig",
    "setConfig",
    "testSolution",
    "submitSolution",
];

/// Little-endian `u32` length prefix, capped at [`MAX_MESSAGE_BYTES`].
pub fn codec() -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .little_endian()
        .length_field_length(HEADER_LEN)
        .max_frame_length(MAX_MESSAGE_BYTES as usize)
        .new_codec()
}

/// Read one envelope and return its raw payload.
///
/// Waits until the 4 header bytes and then exactly `length` payload bytes are
/// buffered, however the stream fragments them.
pub async fn read_frame<R>(reader: &mut R) -> Result<Vec<u8>, IpcError>
where
    R: AsyncRead + Unpin,
{
    let mut frames = FramedRead::new(reader, codec());

    match frames.next().await {
        Some(Ok(payload)) => {
            trace!("Read envelope with {} payload bytes", payload.len());
            Ok(payload.to_vec())
        }
        Some(Err(e)) if e.kind() == ErrorKind::InvalidData => Err(too_large(e)),
        Some(Err(e)) => {
            debug!("Envelope read failed: {e}");
            Err(IpcError::framing(STREAM_CLOSED_MESSAGE))
        }
        None => Err(IpcError::framing(STREAM_CLOSED_MESSAGE)),
    }
}

/// Decode a request payload.
///
/// Malformed JSON is a framing error. Well-formed JSON naming an action we do
/// not serve is an [`IpcError::UnknownAction`].
#[track_caller]
pub fn decode_request(payload: &[u8]) -> Result<Request, IpcError> {
    let value: Value = serde_json::from_slice(payload).map_err(|e| {
        debug!("Parse error: {e}");
        IpcError::framing(INVALID_JSON_MESSAGE)
    })?;

    let action = value
        .get("action")
        .and_then(Value::as_str)
        .map(str::to_string);

    match action {
        Some(action) if !KNOWN_ACTIONS.contains(&action.as_str()) => {
            Err(IpcError::UnknownAction {
                action,
                location: ErrorLocation::from(Location::caller()),
            })
        }
        None => Err(IpcError::UnknownAction {
            action: String::from("<missing>"),
            location: ErrorLocation::from(Location::caller()),
        }),
        Some(_) => serde_json::from_value(value).map_err(|e| IpcError::InvalidRequest {
            message: format!("Invalid request: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[track_caller]
pub fn decode_response(payload: &[u8]) -> Result<Response, IpcError> {
    serde_json::from_slice(payload).map_err(|_| IpcError::framing(INVALID_JSON_MESSAGE))
}

/// Receive one request from the stream.
pub async fn receive<R>(reader: &mut R) -> Result<Request, IpcError>
where
    R: AsyncRead + Unpin,
{
    let payload = read_frame(reader).await?;
    decode_request(&payload)
}

/// Encode a message as header + payload. The length always comes from the
/// encoded payload.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, IpcError> {
    let payload = serde_json::to_vec(message)?;
    let mut frame = BytesMut::with_capacity(HEADER_LEN + payload.len());
    codec()
        .encode(Bytes::from(payload), &mut frame)
        .map_err(too_large)?;
    Ok(frame.to_vec())
}

/// Write one envelope and flush.
pub async fn send<W, T>(writer: &mut W, message: &T) -> Result<(), IpcError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = Bytes::from(serde_json::to_vec(message)?);
    let length = payload.len();

    let mut frames = FramedWrite::new(writer, codec());
    frames.send(payload).await.map_err(|e| match e.kind() {
        ErrorKind::InvalidInput => too_large(e),
        _ => IpcError::from(e),
    })?;
    trace!("Wrote envelope with {length} payload bytes");
    Ok(())
}

fn too_large(error: IoError) -> IpcError {
    IpcError::framing(format!(
        "Message too large: {error} (limit {MAX_MESSAGE_BYTES} bytes)"
    ))
}
