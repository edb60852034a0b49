//! Shared primitives for the leetcode-exporter crates.
//!
//! This crate holds the small building blocks every other crate leans on:
//! source-location tracking for errors, HTTP status classification and a
//! secret wrapper for the session tokens borrowed from the browser.
//!
//! ## Architecture
//!
//! - **common** (this crate): error plumbing and secret handling
//! - **models**: wire and report data structures
//! - **client-core**: IPC, judge client, editor launch, settings
//! - **cli**: the `leetcode-exporter` and `leetcode-exporter-host` binaries

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
