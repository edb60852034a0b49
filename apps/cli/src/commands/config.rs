//! `config [key] [value]`

use crate::commands::CommandOutcome;
use crate::error::CliError;

use client_core::config::{
    ConfigStore, KEY_EDITOR, KEY_LEETCODE_CSRF, KEY_LEETCODE_SESSION, KEY_WORKSPACE_DIR,
};

use std::io::Write;
use std::path::Path;

use serde_json::Value;

const SECRET_KEYS: [&str; 2] = [KEY_LEETCODE_SESSION, KEY_LEETCODE_CSRF];

fn presence(is_set: bool) -> &'static str {
    if is_set { "set" } else { "not set" }
}

/// No key: print everything. Key only: print one value. Key and value: set it.
///
/// Secrets are never echoed, only reported as set or not set.
pub fn run<S, W>(
    store: &S,
    config_path: Option<&Path>,
    key: Option<&str>,
    value: Option<&str>,
    out: &mut W,
) -> Result<CommandOutcome, CliError>
where
    S: ConfigStore,
    W: Write,
{
    match (key, value) {
        (None, _) => {
            let view = store.load()?.view();
            writeln!(out, "\nCurrent configuration:\n")?;
            writeln!(out, "  {KEY_WORKSPACE_DIR}: {}", view.workspace_dir)?;
            writeln!(out, "  {KEY_EDITOR}:       {}", view.editor)?;
            writeln!(out, "  {KEY_LEETCODE_SESSION}: {}", presence(view.has_session))?;
            writeln!(out, "  {KEY_LEETCODE_CSRF}:    {}", presence(view.has_csrf))?;
            for (extra_key, extra_value) in &view.extra {
                writeln!(out, "  {extra_key}: {}", display_value(extra_value))?;
            }
            if let Some(path) = config_path {
                writeln!(out, "\nConfig file: {}\n", path.display())?;
            }
        }

        (Some(key), None) if SECRET_KEYS.contains(&key) => {
            let config = store.load()?;
            let is_set = match key {
                KEY_LEETCODE_SESSION => config.leetcode_session.is_some(),
                _ => config.leetcode_csrf.is_some(),
            };
            writeln!(out, "{}", presence(is_set))?;
        }

        (Some(key), None) => {
            let value = store
                .load()?
                .get(key)
                .ok_or_else(|| CliError::invalid_input(format!("{key} is not set")))?;
            writeln!(out, "{}", display_value(&value))?;
        }

        (Some(key), Some(value)) => {
            store.set(key, value)?;
            if SECRET_KEYS.contains(&key) {
                writeln!(out, "Set {key} ({})", presence(!value.trim().is_empty()))?;
            } else {
                writeln!(out, "Set {key} = {value}")?;
            }
        }
    }

    Ok(CommandOutcome::Success)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
