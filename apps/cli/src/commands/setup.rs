//! `setup`, `register` and `uninstall`.

use crate::commands::CommandOutcome;
use crate::error::CliError;

use client_core::CLI_BINARY;
use client_core::config::ConfigStore;
use client_core::editor::{CommandRunner, extensions_page_chain, launch_first};
use client_core::manifest;

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};

pub const EXTENSIONS_PAGE_URL: &str = "chrome://extensions";
const RULE_WIDTH: usize = 50;

/// Create the workspace, write the host descriptor and print the next steps.
///
/// When `browser` is given, the extensions page is opened through it.
pub async fn setup<S, R, W>(
    store: &S,
    manifest_path: &Path,
    host_path: &Path,
    browser: Option<&R>,
    out: &mut W,
) -> Result<CommandOutcome, CliError>
where
    S: ConfigStore,
    R: CommandRunner,
    W: Write,
{
    writeln!(out, "\nLeetCode Exporter Setup\n")?;

    let config = store.load()?;
    let workspace = PathBuf::from(&config.workspace_dir);
    if !workspace.exists() {
        std::fs::create_dir_all(&workspace).map_err(|e| {
            CliError::cli(format!(
                "Failed to create workspace {}: {e}",
                workspace.display()
            ))
        })?;
        writeln!(out, "Created workspace: {}", workspace.display())?;
    }

    if !host_path.exists() {
        warn!("Host binary not found at {}", host_path.display());
        writeln!(
            out,
            "Warning: host binary not found at {} (install it next to {CLI_BINARY})",
            host_path.display()
        )?;
    }

    manifest::install(manifest_path, host_path)?;
    writeln!(out, "Native messaging host registered")?;
    writeln!(out, "  {}", manifest_path.display())?;

    let rule = "-".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n")?;
    writeln!(out, "To complete setup, in {EXTENSIONS_PAGE_URL}:\n")?;
    writeln!(out, "1. Enable \"Developer mode\" (toggle in top-right)")?;
    writeln!(out, "2. Click \"Load unpacked\" and pick the extension directory")?;
    writeln!(out, "\n{rule}")?;

    if let Some(runner) = browser {
        match launch_first(runner, &extensions_page_chain(), EXTENSIONS_PAGE_URL).await {
            Ok(launched) => info!("Opened extensions page with {}", launched.program),
            Err(e) => {
                warn!("{e}");
                writeln!(out, "\nCould not open Chrome automatically.")?;
                writeln!(out, "Please open Chrome and go to: {EXTENSIONS_PAGE_URL}")?;
            }
        }
    }

    writeln!(out, "\nAfter loading the extension:")?;
    writeln!(out, "  1. Click the extension icon in the Chrome toolbar")?;
    writeln!(out, "  2. Click \"Copy Command\" in the popup")?;
    writeln!(out, "  3. Paste and run the command in your terminal\n")?;

    Ok(CommandOutcome::Success)
}

/// Narrow the descriptor to one extension.
pub fn register<W: Write>(
    manifest_path: &Path,
    extension_id: &str,
    out: &mut W,
) -> Result<CommandOutcome, CliError> {
    writeln!(out, "\nRegistering Extension ID\n")?;

    let id = manifest::register(manifest_path, extension_id)?;

    writeln!(out, "Extension ID registered")?;
    writeln!(out, "  ID: {id}")?;
    writeln!(out, "  Manifest: {}\n", manifest_path.display())?;
    Ok(CommandOutcome::Success)
}

pub fn uninstall<W: Write>(manifest_path: &Path, out: &mut W) -> Result<CommandOutcome, CliError> {
    writeln!(out, "\nLeetCode Exporter Uninstall\n")?;

    if manifest::uninstall(manifest_path)? {
        writeln!(out, "Native messaging host unregistered")?;
        writeln!(out, "  Removed: {}", manifest_path.display())?;
    } else {
        writeln!(out, "Native messaging host was not registered")?;
    }

    writeln!(out, "\nTo complete uninstall:")?;
    writeln!(out, "1. Open {EXTENSIONS_PAGE_URL}")?;
    writeln!(out, "2. Find \"LeetCode Exporter\" and click Remove\n")?;
    Ok(CommandOutcome::Success)
}
