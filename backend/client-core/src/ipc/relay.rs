//! Caller side of the channel: spawn the host, forward one request, return
//! its response or a synthesized failure with a remediation hint.

use crate::error::relay::RelayError;
use crate::ipc::framing;
use crate::manifest::{HostManifest, origin_for};

use models::{Request, Response};

use std::io::ErrorKind;
use std::process::Stdio;

use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;

/// One request/response exchange with a host.
pub trait Transport: Send + Sync {
    fn exchange(
        &self,
        caller_id: &str,
        request: &Request,
    ) -> impl Future<Output = Result<Response, RelayError>> + Send;
}

/// Spawns the program named in the host descriptor, as the browser does.
#[derive(Debug, Clone)]
pub struct ProcessTransport {
    manifest: HostManifest,
}

impl ProcessTransport {
    pub fn new(manifest: HostManifest) -> Self {
        Self { manifest }
    }
}

impl Transport for ProcessTransport {
    async fn exchange(&self, caller_id: &str, request: &Request) -> Result<Response, RelayError> {
        let origin = origin_for(caller_id);
        if !self.manifest.allows(&origin) {
            warn!("{origin} is not in allowed_origins");
            return Err(RelayError::access_denied(caller_id));
        }

        let mut child = TokioCommand::new(&self.manifest.path)
            .arg(&origin)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => RelayError::unreachable(format!(
                    "Specified native messaging host not found: {}",
                    self.manifest.path.display()
                )),
                _ => RelayError::unreachable(format!("Failed to start native host: {e}")),
            })?;

        debug!("Spawned native host (PID: {:?})", child.id());

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RelayError::unreachable("Native host has no stdin"))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| RelayError::unreachable("Native host has no stdout"))?;

        framing::send(&mut stdin, request).await?;
        stdin.shutdown().await.ok();
        drop(stdin);

        let payload = framing::read_frame(&mut stdout).await.map_err(|e| {
            RelayError::unreachable(format!(
                "Native host has exited before answering: {}",
                e.summary()
            ))
        })?;
        let response = framing::decode_response(&payload)?;

        match child.wait().await {
            Ok(status) => debug!("Native host exited with {status}"),
            Err(e) => debug!("Could not reap native host: {e}"),
        }

        Ok(response)
    }
}

/// Forward `request` and return whatever comes back. Delivery failures become
/// `{success: false, error, hint}`; access denials also carry the caller id.
pub async fn relay<T: Transport>(transport: &T, caller_id: &str, request: &Request) -> Response {
    info!("Relaying {} for {caller_id}", request.action());

    match transport.exchange(caller_id, request).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Relay failed: {e}");
            let response = Response::failure(e.summary()).with_hint(e.hint());
            if e.is_access_denied() {
                response.with_extension_id(caller_id)
            } else {
                response
            }
        }
    }
}
