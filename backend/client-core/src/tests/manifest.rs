use crate::manifest::{HostManifest, get_extension_id_regex, normalize_extension_id, origin_for};

/// **VALUE**: Verifies extension id validation matches the browser's id format.
///
/// **BUG THIS CATCHES**: Would catch a pattern without anchors, which would
/// accept a pasted `chrome-extension://...` URL and write a broken origin.
#[test]
fn given_various_ids_when_validated_then_only_32_lowercase_letters_pass() {
    let re = get_extension_id_regex();

    assert!(re.is_match("abcdefghijklmnopabcdefghijklmnop"));
    assert!(!re.is_match("abcdefghijklmnopabcdefghijklmno"));
    assert!(!re.is_match("abcdefghijklmnopabcdefghijklmnop1"));
    assert!(!re.is_match("chrome-extension://abcdefghijklmnopabcdefghijklmnop/"));
}

/// **VALUE**: Verifies ids are trimmed and lowercased before validation.
#[test]
fn given_padded_uppercase_id_when_normalized_then_returns_clean_id() {
    let id = normalize_extension_id("  ABCDEFGHIJKLMNOPABCDEFGHIJKLMNOP\n").expect("valid");

    assert_eq!(id, "abcdefghijklmnopabcdefghijklmnop");
}

/// **VALUE**: Verifies the descriptor's wire shape.
///
/// **WHY THIS MATTERS**: The browser refuses descriptors whose `type` key is
/// missing or whose name differs from the one the extension connects to.
#[test]
fn given_new_manifest_when_serialized_then_has_browser_fields() {
    let manifest = HostManifest::new("/opt/bin/leetcode-exporter-host");

    let value = serde_json::to_value(&manifest).expect("serialize");

    assert_eq!(value["name"], "com.leetcode.exporter");
    assert_eq!(value["type"], "stdio");
    assert_eq!(value["path"], "/opt/bin/leetcode-exporter-host");
    assert_eq!(value["allowed_origins"].as_array().map(Vec::len), Some(1));
}

#[test]
fn given_registered_origin_when_checked_then_allows_only_that_origin() {
    let mut manifest = HostManifest::new("/h");
    manifest.allowed_origins = vec![origin_for("abcdefghijklmnopabcdefghijklmnop")];

    assert!(manifest.allows("chrome-extension://abcdefghijklmnopabcdefghijklmnop/"));
    assert!(!manifest.allows("chrome-extension://bbcdefghijklmnopabcdefghijklmnop/"));
}
