//! Ordered fallback chain for launching an external program on a file.
//!
//! The chain is plain data: a list of [`LaunchDescriptor`]s consumed by
//! [`open_in_editor`]. An entry wins only if it spawns and exits 0. Spawn
//! errors and nonzero exits move on to the next entry; entries after the
//! winner are never run.

pub mod runner;

pub use runner::{CommandRunner, ProcessRunner};

use crate::error::editor::EditorError;

use std::path::Path;

use log::{debug, info};

/// Placeholder replaced by the target path in argument templates.
pub const FILE_PLACEHOLDER: &str = "{file}";

const VS_CODE_INSIDERS_APP: &str = "Visual Studio Code - Insiders";
const VS_CODE_APP: &str = "Visual Studio Code";

/// One way of opening a file: a program and its argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDescriptor {
    pub program: String,
    pub args: Vec<String>,
}

impl LaunchDescriptor {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments with every `{file}` replaced by `path`.
    pub fn render_args(&self, path: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, path))
            .collect()
    }

    /// Display form for logs and error messages.
    pub fn describe(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// The entry that opened the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedEditor {
    /// Zero-based position in the chain.
    pub index: usize,
    pub program: String,
}

pub fn default_chain() -> Vec<LaunchDescriptor> {
    vec![
        LaunchDescriptor::new("code-insiders", [FILE_PLACEHOLDER]),
        LaunchDescriptor::new("code", [FILE_PLACEHOLDER]),
        LaunchDescriptor::new("open", ["-a", VS_CODE_INSIDERS_APP, FILE_PLACEHOLDER]),
        LaunchDescriptor::new("open", ["-a", VS_CODE_APP, FILE_PLACEHOLDER]),
    ]
}

/// Chain for the configured `editor` setting. Anything but `auto` (or blank)
/// is tried first as `<editor> {file}`.
pub fn chain_for(editor: &str) -> Vec<LaunchDescriptor> {
    let editor = editor.trim();
    let mut chain = Vec::new();
    if !editor.is_empty() && editor != crate::config::AUTO_EDITOR {
        chain.push(LaunchDescriptor::new(editor, [FILE_PLACEHOLDER]));
    }
    chain.extend(default_chain());
    chain
}

/// Try each descriptor in order until one exits 0.
pub async fn open_in_editor<R>(
    runner: &R,
    chain: &[LaunchDescriptor],
    path: &Path,
) -> Result<LaunchedEditor, EditorError>
where
    R: CommandRunner,
{
    launch_first(runner, chain, &path.to_string_lossy()).await
}

/// Chain that opens the browser's extensions page for the current platform.
pub fn extensions_page_chain() -> Vec<LaunchDescriptor> {
    if cfg!(target_os = "macos") {
        vec![LaunchDescriptor::new(
            "open",
            ["-a", "Google Chrome", FILE_PLACEHOLDER],
        )]
    } else if cfg!(windows) {
        vec![LaunchDescriptor::new(
            "cmd",
            ["/C", "start", "chrome", FILE_PLACEHOLDER],
        )]
    } else {
        vec![
            LaunchDescriptor::new("google-chrome", [FILE_PLACEHOLDER]),
            LaunchDescriptor::new("chromium-browser", [FILE_PLACEHOLDER]),
        ]
    }
}

/// Run the chain against `target` and report the first entry that exits 0.
pub async fn launch_first<R>(
    runner: &R,
    chain: &[LaunchDescriptor],
    target: &str,
) -> Result<LaunchedEditor, EditorError>
where
    R: CommandRunner,
{
    let mut attempts = Vec::with_capacity(chain.len());

    for (index, descriptor) in chain.iter().enumerate() {
        let args = descriptor.render_args(target);

        match runner.run(&descriptor.program, &args).await {
            Ok(Some(0)) => {
                info!("Opened with: {}", descriptor.program);
                return Ok(LaunchedEditor {
                    index,
                    program: descriptor.program.clone(),
                });
            }
            Ok(code) => {
                debug!("{} exited with {code:?}, trying next", descriptor.describe());
            }
            Err(e) => {
                debug!("{} failed to start: {e}, trying next", descriptor.program);
            }
        }

        attempts.push(descriptor.program.clone());
    }

    Err(EditorError::not_found(attempts))
}
