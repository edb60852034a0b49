//! Lifecycle of the privileged host process: one request in, one response
//! out, then exit.
//!
//! Reading the request and handling it each race a watchdog measured from
//! process start. Whichever finishes first decides the single response.

use crate::error::ipc::IpcError;
use crate::ipc::dispatch::RequestHandler;
use crate::ipc::framing;

use models::{Request, Response};

use std::time::Duration;

use log::{error, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::{Instant, timeout_at};

/// Budget for reading the request and for the quick actions.
pub const READ_WATCHDOG: Duration = Duration::from_secs(10);
/// Budget for test/submit (60 polls at 1 s plus the start request).
pub const JUDGE_WATCHDOG: Duration = Duration::from_secs(90);

const TIMEOUT_MESSAGE: &str = "Timeout";

/// How the host finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostExit {
    /// A request was handled (successfully or not) and answered.
    Completed,
    /// The inbound envelope was unusable.
    Rejected,
    /// A watchdog fired first.
    TimedOut,
    /// The response could not be written.
    WriteFailed,
}

impl HostExit {
    pub fn code(&self) -> u8 {
        match self {
            HostExit::Completed => 0,
            HostExit::Rejected | HostExit::TimedOut | HostExit::WriteFailed => 1,
        }
    }
}

/// Watchdog budgets, both measured from process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watchdogs {
    /// Reading the request and answering a quick action.
    pub read: Duration,
    /// Answering test/submit.
    pub judge: Duration,
}

impl Default for Watchdogs {
    fn default() -> Self {
        Self {
            read: READ_WATCHDOG,
            judge: JUDGE_WATCHDOG,
        }
    }
}

impl Watchdogs {
    /// Budget for a request.
    pub fn budget_for(&self, request: &Request) -> Duration {
        if request.is_judge_job() {
            self.judge
        } else {
            self.read
        }
    }
}

/// Read one request, handle it and write exactly one response.
pub async fn run_host<R, W, H>(
    reader: &mut R,
    writer: &mut W,
    handler: &H,
    started: Instant,
    watchdogs: Watchdogs,
) -> HostExit
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: RequestHandler,
{
    let request = match timeout_at(started + watchdogs.read, framing::receive(reader)).await {
        Err(_) => {
            warn!("No request within {:?}", watchdogs.read);
            return respond(writer, &Response::failure(TIMEOUT_MESSAGE), HostExit::TimedOut).await;
        }
        Ok(Err(e)) => {
            error!("Rejected request: {e}");
            let exit = if e.is_framing() {
                HostExit::Rejected
            } else {
                HostExit::Completed
            };
            return respond(writer, &failure_for(&e), exit).await;
        }
        Ok(Ok(request)) => request,
    };

    let budget = watchdogs.budget_for(&request);
    let action = request.action();
    info!("Received {action}");

    match timeout_at(started + budget, handler.handle(request)).await {
        Ok(response) => {
            info!("Sending {action} response (success: {})", response.success);
            respond(writer, &response, HostExit::Completed).await
        }
        Err(_) => {
            warn!("{action} did not finish within {budget:?}");
            respond(writer, &Response::failure(TIMEOUT_MESSAGE), HostExit::TimedOut).await
        }
    }
}

fn failure_for(error: &IpcError) -> Response {
    let response = Response::failure(error.summary());
    match error.hint() {
        Some(hint) => response.with_hint(hint),
        None => response,
    }
}

async fn respond<W>(writer: &mut W, response: &Response, exit: HostExit) -> HostExit
where
    W: AsyncWrite + Unpin,
{
    match framing::send(writer, response).await {
        Ok(()) => exit,
        Err(e) => {
            error!("Failed to write response: {e}");
            HostExit::WriteFailed
        }
    }
}
