//! The privileged native-messaging host: one framed request on stdin, one
//! framed response on stdout.

use client_core::config::FileConfigStore;
use client_core::error::CoreError;
use client_core::READ_WATCHDOG_ENV_VAR;
use client_core::ipc::{Dispatcher, HostExit, RequestHandler, Watchdogs, run_host};

use models::{Request, Response};

use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};
use tokio::time::Instant;

/// Answers every request with the error that kept the host from starting.
///
/// The browser still gets exactly one well-formed response.
pub struct StartupFailure {
    response: Response,
}

impl StartupFailure {
    pub fn new(error: &CoreError) -> Self {
        Self {
            response: error.to_response(),
        }
    }
}

impl RequestHandler for StartupFailure {
    async fn handle(&self, request: Request) -> Response {
        error!("Not handling {}: host failed to start", request.action());
        self.response.clone()
    }
}

/// Default budgets, with the read budget overridden by
/// `LEETCODE_EXPORTER_READ_WATCHDOG_MS` when it holds a number of milliseconds.
pub fn watchdogs_from(read_override: Option<&str>) -> Watchdogs {
    let defaults = Watchdogs::default();
    match read_override.map(|raw| raw.trim().parse::<u64>()) {
        None => defaults,
        Some(Ok(millis)) => Watchdogs {
            read: Duration::from_millis(millis),
            ..defaults
        },
        Some(Err(e)) => {
            warn!("Ignoring {READ_WATCHDOG_ENV_VAR}: {e}");
            defaults
        }
    }
}

/// Build the dispatcher and serve one request over stdio.
///
/// `started` is the process start; the watchdogs are measured from it.
pub async fn run(started: Instant) -> HostExit {
    let watchdogs = watchdogs_from(std::env::var(READ_WATCHDOG_ENV_VAR).ok().as_deref());

    // The browser passes the calling extension's origin as the first argument.
    match std::env::args().nth(1) {
        Some(origin) => info!("Host started by {origin}"),
        None => info!("Host started without a caller origin"),
    }

    let mut stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();

    let dispatcher = FileConfigStore::default_location()
        .map_err(CoreError::from)
        .and_then(|store| Dispatcher::new(Arc::new(store)));

    let exit = match dispatcher {
        Ok(dispatcher) => run_host(&mut stdin, &mut stdout, &dispatcher, started, watchdogs).await,
        Err(e) => {
            error!("Host startup failed: {e}");
            let handler = StartupFailure::new(&e);
            run_host(&mut stdin, &mut stdout, &handler, started, watchdogs).await
        }
    };

    info!("Host exiting with {exit:?}");
    exit
}
