//! Subcommand implementations.
//!
//! Each command writes its user-facing output to the given writer and takes
//! its stores and paths as arguments; [`run`] wires in the real locations.

pub mod config;
pub mod judge;
pub mod send;
pub mod setup;

use crate::cli::Command;
use crate::error::CliError;

use client_core::HOST_BINARY;
use client_core::config::FileConfigStore;
use client_core::editor::ProcessRunner;
use client_core::ipc::ProcessTransport;
use client_core::judge::JudgeClient;
use client_core::manifest::{HostManifest, default_manifest_path};

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// How a command that did not error finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// The command ran but the answer was negative (not accepted, relay failure).
    Rejected,
}

impl CommandOutcome {
    pub fn code(&self) -> u8 {
        match self {
            CommandOutcome::Success => 0,
            CommandOutcome::Rejected => 1,
        }
    }
}

/// Run a parsed command against the real settings file, descriptor and judge.
pub async fn run<W: Write>(command: Command, out: &mut W) -> Result<CommandOutcome, CliError> {
    match command {
        Command::Setup { open_extensions } => {
            let store = FileConfigStore::default_location()?;
            let browser = open_extensions.then_some(ProcessRunner);
            setup::setup(
                &store,
                &default_manifest_path()?,
                &host_binary_path()?,
                browser.as_ref(),
                out,
            )
            .await
        }

        Command::Register { extension_id } => {
            setup::register(&default_manifest_path()?, &extension_id, out)
        }

        Command::Uninstall => setup::uninstall(&default_manifest_path()?, out),

        Command::Test { target } => run_judge(judge::JudgeMode::Test, target, out).await,

        Command::Submit { target } => run_judge(judge::JudgeMode::Submit, target, out).await,

        Command::Config { key, value } => {
            let store = FileConfigStore::default_location()?;
            config::run(
                &store,
                Some(store.path()),
                key.as_deref(),
                value.as_deref(),
                out,
            )
        }

        Command::Send { json, caller } => {
            let manifest = HostManifest::load(&default_manifest_path()?)?;
            let caller = caller
                .or_else(|| manifest.first_extension_id().map(str::to_string))
                .ok_or_else(|| {
                    CliError::invalid_input("No extension is registered, pass --caller <id>")
                })?;
            send::run(&ProcessTransport::new(manifest), &caller, &json, out).await
        }
    }
}

async fn run_judge<W: Write>(
    mode: judge::JudgeMode,
    target: Option<PathBuf>,
    out: &mut W,
) -> Result<CommandOutcome, CliError> {
    let target = match target {
        Some(target) => target,
        None => std::env::current_dir()
            .map_err(|e| CliError::cli(format!("Cannot read current directory: {e}")))?,
    };
    let store = Arc::new(FileConfigStore::default_location()?);
    let client = JudgeClient::new(store)?;
    let color = std::io::stdout().is_terminal();

    judge::run(&client, mode, &target, color, out).await
}

/// The host binary installed next to this one.
fn host_binary_path() -> Result<PathBuf, CliError> {
    let exe = std::env::current_exe()
        .map_err(|e| CliError::cli(format!("Cannot locate the running binary: {e}")))?;
    Ok(exe.with_file_name(format!("{HOST_BINARY}{}", std::env::consts::EXE_SUFFIX)))
}
