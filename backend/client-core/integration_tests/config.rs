use client_core::config::{
    CONFIG_FILE_NAME, ConfigStore, CredentialSupplier, FileConfigStore, KEY_EDITOR,
    KEY_LEETCODE_SESSION, KEY_WORKSPACE_DIR,
};
use client_core::error::config::ConfigError;

use serde_json::{Value, json};
use tempfile::TempDir;

// ============================================================================
// File-backed settings store
// ============================================================================

fn store_in(dir: &TempDir) -> FileConfigStore {
    FileConfigStore::new(dir.path().join(CONFIG_FILE_NAME))
}

fn read_json(store: &FileConfigStore) -> Value {
    let contents = std::fs::read_to_string(store.path()).expect("read config");
    serde_json::from_str(&contents).expect("config json")
}

/// **VALUE**: Verifies a first run works without a settings file.
#[test]
fn given_no_file_when_loaded_then_defaults() {
    // GIVEN: An empty directory
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);

    // WHEN: Loading
    let config = store.load().expect("load");

    // THEN: Defaults, and no file was created
    assert_eq!(config.editor, "auto");
    assert!(config.workspace_dir.ends_with("leetcode"));
    assert!(!store.path().exists());
}

/// **VALUE**: Verifies `set` persists and a fresh store reads it back.
#[test]
fn given_set_workspace_when_reloaded_then_value_persisted() {
    // GIVEN: A store
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);

    // WHEN: Setting workspaceDir and reading through another store
    store.set(KEY_WORKSPACE_DIR, "/tmp/x").expect("set");
    let view = store_in(&dir).load().expect("load").view();

    // THEN: The value is visible and no temp file is left behind
    assert_eq!(view.workspace_dir, "/tmp/x");
    assert!(!view.has_session);
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

/// **VALUE**: Verifies keys written by other versions survive a save.
///
/// **BUG THIS CATCHES**: Would catch a typed round trip that silently drops
/// settings this build does not know about.
#[test]
fn given_unknown_keys_on_disk_when_setting_changed_then_unknown_keys_kept() {
    // GIVEN: A settings file with an extra key
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        json!({ "workspaceDir": "/w", "editor": "auto", "theme": "dark" }).to_string(),
    )
    .expect("seed");

    // WHEN: Changing another key
    store.set(KEY_EDITOR, "nvim").expect("set");

    // THEN: The extra key is still there
    let on_disk = read_json(&store);
    assert_eq!(on_disk["theme"], "dark");
    assert_eq!(on_disk["editor"], "nvim");
    assert_eq!(on_disk["workspaceDir"], "/w");
}

/// **VALUE**: Verifies secrets are stored but only exposed as flags.
///
/// **WHY THIS MATTERS**: `getConfig` answers go back into the browser and
/// into logs. The session cookie must never travel that way.
#[test]
fn given_session_set_when_viewed_then_only_presence_flag_shown() {
    // GIVEN: A store with a session
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.set(KEY_LEETCODE_SESSION, "super-secret").expect("set");

    // WHEN: Viewing and asking for credentials
    let config = store.load().expect("load");
    let view_json = serde_json::to_string(&config.view()).expect("view json");
    let credentials = store.credentials().expect("credentials").expect("present");

    // THEN: The view has the flag but not the value
    assert!(view_json.contains("\"hasSession\":true"));
    assert!(!view_json.contains("super-secret"));
    assert!(!format!("{config:?}").contains("super-secret"));
    assert_eq!(credentials.session.as_str(), "super-secret");
    assert_eq!(credentials.csrf.as_str(), "");
}

/// **VALUE**: Verifies an empty value clears a secret.
#[test]
fn given_session_cleared_when_loaded_then_no_credentials() {
    // GIVEN: A stored session
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.set(KEY_LEETCODE_SESSION, "abc").expect("set");

    // WHEN: Setting it to empty
    store.set(KEY_LEETCODE_SESSION, "").expect("clear");

    // THEN: Nothing stored
    assert!(store.credentials().expect("credentials").is_none());
    assert!(read_json(&store).get(KEY_LEETCODE_SESSION).is_none());
}

/// **VALUE**: Verifies a corrupt file reads as the defaults and is left alone.
///
/// **WHY THIS MATTERS**: Every `openProblem` loads the settings. A stray typo
/// in a hand-edited file must not stop problems from being exported.
#[test]
fn given_corrupt_file_when_loaded_then_defaults_and_file_untouched() {
    // GIVEN: A file that is not JSON
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ workspaceDir: ").expect("seed");

    // WHEN: Loading
    let config = store.load().expect("load");

    // THEN: Defaults, and the file still holds what the user wrote
    assert_eq!(config.editor, "auto");
    assert!(config.workspace_dir.ends_with("leetcode"));
    assert_eq!(
        std::fs::read_to_string(store.path()).expect("read"),
        "{ workspaceDir: "
    );
}

/// **VALUE**: Verifies `set` on a corrupt file is an error, not a silent reset.
///
/// **BUG THIS CATCHES**: Would catch `set` building on the fallback defaults
/// and overwriting the user's hand-edited file.
#[test]
fn given_corrupt_file_when_set_then_parse_error_and_file_untouched() {
    // GIVEN: A file that is not JSON
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ workspaceDir: ").expect("seed");

    // WHEN: Setting a key
    let result = store.set(KEY_EDITOR, "vim");

    // THEN: Parse error with a hint, file untouched
    match result {
        Err(e @ ConfigError::ParseError { .. }) => assert!(e.hint().is_some()),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(
        std::fs::read_to_string(store.path()).expect("read"),
        "{ workspaceDir: "
    );
}

#[test]
fn given_empty_editor_when_set_then_validation_error_and_file_unchanged() {
    // GIVEN: A store with a saved editor
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.set(KEY_EDITOR, "vim").expect("set");

    // WHEN: Setting the editor to blank
    let result = store.set(KEY_EDITOR, "  ");

    // THEN: Rejected, previous value kept
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    assert_eq!(read_json(&store)["editor"], "vim");
}
