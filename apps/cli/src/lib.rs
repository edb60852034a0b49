// Library exports for testing
// Both binaries (main.rs, host_main.rs) import these as well

pub mod cli;
pub mod commands;
pub mod error;
pub mod host;
pub mod logger;
pub mod output;

#[cfg(test)]
mod tests;
