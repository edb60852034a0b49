//! `send <json>`: drive one request through the relay, as the browser would.

use crate::commands::CommandOutcome;
use crate::error::CliError;

use client_core::ipc::framing::decode_request;
use client_core::ipc::{Transport, relay};

use models::Response;

use std::io::Write;

/// Decode `json`, relay it as `caller_id` and print the response.
///
/// A request that does not decode is answered locally, the same way the
/// host would answer it.
pub async fn run<T, W>(
    transport: &T,
    caller_id: &str,
    json: &str,
    out: &mut W,
) -> Result<CommandOutcome, CliError>
where
    T: Transport,
    W: Write,
{
    let response = match decode_request(json.as_bytes()) {
        Ok(request) => relay(transport, caller_id, &request).await,
        Err(e) => {
            let response = Response::failure(e.summary());
            match e.hint() {
                Some(hint) => response.with_hint(hint),
                None => response,
            }
        }
    };

    let rendered = serde_json::to_string_pretty(&response)
        .map_err(|e| CliError::cli(format!("Failed to render response: {e}")))?;
    writeln!(out, "{rendered}")?;

    Ok(if response.success {
        CommandOutcome::Success
    } else {
        CommandOutcome::Rejected
    })
}
