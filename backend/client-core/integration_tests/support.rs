//! Fakes shared by the integration tests.

use client_core::config::UserConfig;
use client_core::editor::CommandRunner;
use client_core::judge::Sleeper;

use std::collections::HashMap;
use std::io::{self, ErrorKind};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_SESSION: &str = "session-cookie-value";
pub const TEST_CSRF: &str = "csrf-token-value";

/// Config with both judge secrets set.
pub fn signed_in_config() -> UserConfig {
    UserConfig {
        leetcode_session: Some(TEST_SESSION.to_string()),
        leetcode_csrf: Some(TEST_CSRF.to_string()),
        ..Default::default()
    }
}

/// Records requested waits and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("lock").clone()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("lock").push(duration);
    }
}

/// Programs map to an exit code; anything else fails to spawn.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    exits: HashMap<String, i32>,
}

impl ScriptedRunner {
    pub fn with_exit(mut self, program: &str, code: i32) -> Self {
        self.exits.insert(program.to_string(), code);
        self
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, _args: &[String]) -> io::Result<Option<i32>> {
        match self.exits.get(program) {
            Some(code) => Ok(Some(*code)),
            None => Err(io::Error::new(ErrorKind::NotFound, "not found")),
        }
    }
}
