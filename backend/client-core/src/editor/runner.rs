use std::io;
use std::process::Stdio;

use tokio::process::Command as TokioCommand;

/// Runs a program to completion.
///
/// `Ok(Some(code))` is a normal exit, `Ok(None)` a signal-terminated one and
/// `Err` a spawn failure (usually `ErrorKind::NotFound`).
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> impl Future<Output = io::Result<Option<i32>>> + Send;
}

/// Spawns real processes with stdio detached from ours.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
        let status = TokioCommand::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        Ok(status.code())
    }
}
