//! Command-line surface of `leetcode-exporter`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "leetcode-exporter",
    version,
    about = "Open LeetCode problems in your editor, then test and submit from the terminal"
)]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Warnings only unless `--verbose`; normal output goes to stdout.
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Warn
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register the native messaging host and create the workspace
    Setup {
        /// Open the browser's extensions page when done
        #[arg(long)]
        open_extensions: bool,
    },

    /// Allow only this extension ID to talk to the host
    Register {
        /// 32-letter ID from chrome://extensions
        extension_id: String,
    },

    /// Remove the native messaging host registration
    Uninstall,

    /// Run a solution against its first example on LeetCode
    Test {
        /// Problem directory or solution file (default: current directory)
        target: Option<PathBuf>,
    },

    /// Submit a solution to LeetCode
    Submit {
        /// Problem directory or solution file (default: current directory)
        target: Option<PathBuf>,
    },

    /// View or set configuration
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Send one JSON request through the native host, as the extension does
    Send {
        /// Request JSON, e.g. '{"action":"getConfig"}'
        json: String,

        /// Extension ID to present as the caller (default: the registered one)
        #[arg(long)]
        caller: Option<String>,
    },
}
