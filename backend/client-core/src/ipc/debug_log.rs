//! Append-only debug log with single-generation rotation.
//!
//! The host's stdout carries the protocol, so its log lines go here instead.

use crate::DEBUG_ENV_VAR;

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEBUG_LOG_FILE_NAME: &str = "leetcode-exporter-debug.log";
pub const MAX_LOG_BYTES: u64 = 1024 * 1024;
const ROTATED_SUFFIX: &str = ".old";

/// Whether the debug log is on. Anything but an explicit `0` enables it.
pub fn debug_enabled() -> bool {
    debug_enabled_from(std::env::var(DEBUG_ENV_VAR).ok().as_deref())
}

pub(crate) fn debug_enabled_from(value: Option<&str>) -> bool {
    value.map(str::trim) != Some("0")
}

/// `~/leetcode-exporter-debug.log`, or `None` without a home directory.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEBUG_LOG_FILE_NAME))
}

/// `<log>.old`
pub fn rotated_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(ROTATED_SUFFIX);
    PathBuf::from(name)
}

/// A log file that moves itself to `<log>.old` once it would grow past
/// `max_bytes`. At most one old generation is kept.
#[derive(Debug)]
pub struct RotatingLogFile {
    path: PathBuf,
    max_bytes: u64,
    file: File,
    written: u64,
}

impl RotatingLogFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            file,
            written,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let old = rotated_path(&self.path);
        if old.exists() {
            std::fs::remove_file(&old)?;
        }
        std::fs::rename(&self.path, &old)?;
        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
