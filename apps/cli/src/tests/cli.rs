// Unit tests for argument parsing

use crate::cli::{Cli, Command};

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// **VALUE**: Verifies `config key value` parses into both positionals.
///
/// **BUG THIS CATCHES**: Would catch the value being treated as a second key.
#[test]
fn given_config_with_key_and_value_when_parsed_then_both_captured() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from(["leetcode-exporter", "config", "editor", "code"]).unwrap();

    // THEN
    match cli.command {
        Command::Config { key, value } => {
            assert_eq!(key.as_deref(), Some("editor"));
            assert_eq!(value.as_deref(), Some("code"));
        }
        other => panic!("Expected Config, got {other:?}"),
    }
}

/// **VALUE**: Verifies `test` defaults to no target (current directory).
///
/// **WHY THIS MATTERS**: The usual flow is `cd 1-two-sum && leetcode-exporter test`.
#[test]
fn given_test_without_target_when_parsed_then_target_is_none() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from(["leetcode-exporter", "test"]).unwrap();

    // THEN
    assert!(matches!(cli.command, Command::Test { target: None }));
    assert_eq!(cli.log_level(), LevelFilter::Warn);
}

#[test]
fn given_submit_with_path_and_verbose_when_parsed_then_trace_level() {
    // GIVEN/WHEN: --verbose after the subcommand (global flag)
    let cli =
        Cli::try_parse_from(["leetcode-exporter", "submit", "1-two-sum", "--verbose"]).unwrap();

    // THEN
    match &cli.command {
        Command::Submit { target } => {
            assert_eq!(target.as_deref(), Some(PathBuf::from("1-two-sum").as_path()));
        }
        other => panic!("Expected Submit, got {other:?}"),
    }
    assert_eq!(cli.log_level(), LevelFilter::Trace);
}

/// **VALUE**: Verifies `register` requires its extension id.
///
/// **BUG THIS CATCHES**: Would catch the id becoming optional and registering nothing.
#[test]
fn given_register_without_id_when_parsed_then_error() {
    // GIVEN/WHEN
    let result = Cli::try_parse_from(["leetcode-exporter", "register"]);

    // THEN
    assert!(result.is_err());
}

#[test]
fn given_send_with_caller_when_parsed_then_caller_captured() {
    // GIVEN/WHEN
    let cli = Cli::try_parse_from([
        "leetcode-exporter",
        "send",
        r#"{"action":"getConfig"}"#,
        "--caller",
        "abcdefghijklmnopabcdefghijklmnop",
    ])
    .unwrap();

    // THEN
    match cli.command {
        Command::Send { json, caller } => {
            assert_eq!(json, r#"{"action":"getConfig"}"#);
            assert_eq!(caller.as_deref(), Some("abcdefghijklmnopabcdefghijklmnop"));
        }
        other => panic!("Expected Send, got {other:?}"),
    }
}
