// Unit tests for the settings model.
// File and memory store behavior is covered in integration_tests/config.rs

use crate::config::{AUTO_EDITOR, UserConfig};

use serde_json::json;

/// **VALUE**: Verifies that an empty settings file yields the documented defaults.
///
/// **WHY THIS MATTERS**: First-run users have no settings file. Missing defaults
/// would write problems to the current directory instead of `~/leetcode`.
///
/// **BUG THIS CATCHES**: Would catch removal of a `#[serde(default = ...)]`.
#[test]
fn given_empty_json_object_when_parsed_then_defaults_apply() {
    // GIVEN: An empty settings document
    let raw = "{}";

    // WHEN: Parsing
    let config: UserConfig = serde_json::from_str(raw).expect("should parse");

    // THEN: Defaults are filled in
    assert_eq!(config.editor, AUTO_EDITOR);
    assert!(config.workspace_dir.ends_with("leetcode"));
    assert!(config.leetcode_session.is_none());
    assert!(config.extra.is_empty());
}

/// **VALUE**: Verifies that keys this version does not know survive a round trip.
///
/// **BUG THIS CATCHES**: Would catch dropping `#[serde(flatten)]`, which would
/// silently erase settings written by newer versions.
#[test]
fn given_unknown_key_when_round_tripped_then_key_is_preserved() {
    let raw = r#"{"workspaceDir":"/w","editor":"vim","theme":"dark"}"#;

    let config: UserConfig = serde_json::from_str(raw).expect("should parse");
    let written = serde_json::to_value(&config).expect("should serialize");

    assert_eq!(written["theme"], "dark");
    assert_eq!(written["workspaceDir"], "/w");
}

/// **VALUE**: Verifies secrets never appear in the view returned to callers.
///
/// **WHY THIS MATTERS**: `getConfig` answers the browser. Echoing the session
/// cookie back would hand it to any page script that can talk to the extension.
///
/// **BUG THIS CATCHES**: Would catch a view built by serializing the raw config.
#[test]
fn given_stored_secrets_when_viewed_then_only_presence_flags_are_exposed() {
    // GIVEN: Config with a session but no CSRF token
    let mut config = UserConfig::default();
    config.set("leetcodeSession", "secret-session").expect("set");

    // WHEN: Building the view
    let view = serde_json::to_value(config.view()).expect("serialize");

    // THEN: Flags only
    assert_eq!(view["hasSession"], true);
    assert_eq!(view["hasCsrf"], false);
    assert!(view.get("leetcodeSession").is_none());
    assert!(!view.to_string().contains("secret-session"));
}

/// **VALUE**: Verifies that `set` with an empty value clears a secret.
#[test]
fn given_session_when_set_to_empty_then_session_is_cleared() {
    let mut config = UserConfig::default();
    config.set("leetcodeSession", "abc").expect("set");

    config.set("leetcodeSession", "").expect("clear");

    assert!(config.leetcode_session.is_none());
    assert!(config.credentials().is_none());
}

/// **VALUE**: Verifies validation rejects an empty workspace directory.
#[test]
fn given_empty_workspace_when_set_then_returns_validation_error() {
    let mut config = UserConfig::default();

    let result = config.set("workspaceDir", "   ");

    assert!(result.is_err(), "blank workspaceDir must be rejected");
}

/// **VALUE**: Verifies lookups by key go through the redacted view.
#[test]
fn given_config_when_get_called_then_returns_view_values() {
    let mut config = UserConfig::default();
    config.set("editor", "nvim").expect("set");
    config.set("leetcodeCsrf", "token").expect("set");

    assert_eq!(config.get("editor"), Some(json!("nvim")));
    assert_eq!(config.get("hasCsrf"), Some(json!(true)));
    assert_eq!(config.get("leetcodeCsrf"), None);
}

/// **VALUE**: Verifies credentials carry the CSRF token as an empty secret
/// when only the session is known.
#[test]
fn given_session_without_csrf_when_credentials_requested_then_csrf_is_empty() {
    let mut config = UserConfig::default();
    config.set("leetcodeSession", "s").expect("set");

    let credentials = config.credentials().expect("session present");

    assert_eq!(credentials.session.as_str(), "s");
    assert!(credentials.csrf.is_empty());
}

/// **VALUE**: Verifies the Debug output never contains secret values.
#[test]
fn given_secrets_when_debug_formatted_then_values_are_hidden() {
    let mut config = UserConfig::default();
    config.set("leetcodeSession", "very-secret").expect("set");

    let debug = format!("{config:?}");

    assert!(!debug.contains("very-secret"));
    assert!(debug.contains("has_session: true"));
}
