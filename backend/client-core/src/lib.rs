pub mod config;
pub mod editor;
pub mod error;
pub mod ipc;
pub mod judge;
pub mod manifest;
pub mod problem_file;
pub mod solution;

#[cfg(test)]
mod tests;

pub const CLI_BINARY: &str = "leetcode-exporter";
pub const HOST_BINARY: &str = "leetcode-exporter-host";
pub const HOST_NAME: &str = "com.leetcode.exporter";
pub const LEETCODE_HOSTNAME: &str = "leetcode.com";
pub const LEETCODE_BASE_URL: &str = const_format::concatcp!("https://", LEETCODE_HOSTNAME);

/// Set to `0` to silence the host's debug log.
pub const DEBUG_ENV_VAR: &str = "LEETCODE_EXPORTER_DEBUG";
/// Milliseconds the host waits for a request before answering "Timeout".
pub const READ_WATCHDOG_ENV_VAR: &str = "LEETCODE_EXPORTER_READ_WATCHDOG_MS";
