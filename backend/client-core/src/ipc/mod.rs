//! The native-messaging channel between the browser and the host process.
//!
//! # Protocol
//!
//! Each direction carries exactly one envelope: a `u32` little-endian byte
//! count followed by that many bytes of UTF-8 JSON. The host reads one
//! request from stdin, writes one response to stdout and exits.
//!
//! - [`framing`]: envelope encode/decode over any async byte stream
//! - [`host`]: the single-request lifecycle and its watchdog
//! - [`dispatch`]: request routing to settings, files, editor and judge
//! - [`relay`]: the caller side, which spawns the host and forwards one request
//! - [`debug_log`]: size-capped log file (stdout belongs to the protocol)

pub mod debug_log;
pub mod dispatch;
pub mod framing;
pub mod host;
pub mod relay;

pub use dispatch::{Dispatcher, RequestHandler};
pub use host::{HostExit, Watchdogs, run_host};
pub use relay::{ProcessTransport, Transport, relay};
