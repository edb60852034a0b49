use leetcode_exporter::commands::CommandOutcome;
use leetcode_exporter::commands::config::run;
use leetcode_exporter::error::CliError;

use client_core::config::{ConfigStore, FileConfigStore, KEY_EDITOR, KEY_LEETCODE_SESSION};

use tempfile::TempDir;

// ============================================================================
// `config` against a real settings file
// ============================================================================

fn store_in(dir: &TempDir) -> FileConfigStore {
    FileConfigStore::new(dir.path().join(".leetcode-exporter.json"))
}

fn output_of(
    store: &FileConfigStore,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<(CommandOutcome, String), CliError> {
    let mut out = Vec::new();
    let outcome = run(store, Some(store.path()), key, value, &mut out)?;
    Ok((outcome, String::from_utf8(out).unwrap()))
}

/// **VALUE**: Verifies `config editor code` persists and `config editor` reads it back.
///
/// **BUG THIS CATCHES**: Would catch the set path writing somewhere the get
/// path does not read.
#[test]
fn given_editor_set_when_read_back_then_value_printed() {
    // GIVEN: A fresh settings file
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // WHEN: Setting, then reading
    let (_, set_output) = output_of(&store, Some(KEY_EDITOR), Some("code")).unwrap();
    let (outcome, get_output) = output_of(&store, Some(KEY_EDITOR), None).unwrap();

    // THEN
    assert_eq!(set_output, "Set editor = code\n");
    assert_eq!(get_output, "code\n");
    assert_eq!(outcome, CommandOutcome::Success);
    assert_eq!(store.load().unwrap().editor, "code");
}

/// **VALUE**: Verifies the session secret never reaches the terminal.
///
/// **WHY THIS MATTERS**: Terminal output ends up in scrollback, screenshots
/// and bug reports. The session cookie is a full login.
///
/// **BUG THIS CATCHES**: Would catch any of the three print paths echoing the value.
#[test]
fn given_session_set_when_printed_any_way_then_value_never_shown() {
    // GIVEN: A stored session
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let secret = "super-secret-session-cookie";

    // WHEN: Setting, reading one key, and listing all
    let (_, set_output) = output_of(&store, Some(KEY_LEETCODE_SESSION), Some(secret)).unwrap();
    let (_, get_output) = output_of(&store, Some(KEY_LEETCODE_SESSION), None).unwrap();
    let (_, list_output) = output_of(&store, None, None).unwrap();

    // THEN: Presence only
    for output in [&set_output, &get_output, &list_output] {
        assert!(!output.contains(secret), "Secret leaked: {output}");
    }
    assert_eq!(get_output, "set\n");
    assert!(list_output.contains("leetcodeSession: set"));
    assert!(list_output.contains("leetcodeCsrf:    not set"));
    assert!(list_output.contains(&format!("Config file: {}", store.path().display())));
}

#[test]
fn given_unknown_key_when_read_then_invalid_input() {
    // GIVEN: A fresh settings file
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // WHEN
    let err = output_of(&store, Some("retries"), None).unwrap_err();

    // THEN
    assert!(matches!(err, CliError::InvalidInput { .. }));
    assert_eq!(err.summary(), "retries is not set");
}

/// **VALUE**: Verifies extra keys round-trip and are listed.
///
/// **BUG THIS CATCHES**: Would catch unknown keys being dropped on save.
#[test]
fn given_extra_key_set_when_listed_then_shown() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    // WHEN
    output_of(&store, Some("theme"), Some("dark")).unwrap();
    let (_, list_output) = output_of(&store, None, None).unwrap();
    let (_, get_output) = output_of(&store, Some("theme"), None).unwrap();

    // THEN
    assert!(list_output.contains("  theme: dark"));
    assert_eq!(get_output, "dark\n");
}

/// **VALUE**: Verifies a corrupt settings file is reported, not overwritten.
///
/// **BUG THIS CATCHES**: Would catch `set` silently replacing a hand-edited file
/// that has a typo with defaults.
#[test]
fn given_corrupt_file_when_set_then_error_and_file_untouched() {
    // GIVEN: Invalid JSON on disk
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ not json").unwrap();

    // WHEN
    let err = output_of(&store, Some(KEY_EDITOR), Some("vim")).unwrap_err();

    // THEN
    assert!(matches!(err, CliError::Core(_)));
    assert!(err.hint().is_some());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
}

/// **VALUE**: Verifies listing a corrupt settings file shows the defaults.
#[test]
fn given_corrupt_file_when_listed_then_defaults_printed() {
    // GIVEN: Invalid JSON on disk
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ not json").unwrap();

    // WHEN
    let (outcome, output) = output_of(&store, None, None).unwrap();

    // THEN
    assert_eq!(outcome, CommandOutcome::Success);
    assert!(output.contains("editor:       auto"));
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
}
