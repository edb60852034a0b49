use client_core::HOST_NAME;
use client_core::error::manifest::ManifestError;
use client_core::manifest::{HOST_TYPE, HostManifest, install, origin_for, register, uninstall};

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// Host descriptor lifecycle: setup -> register -> uninstall
// ============================================================================

const EXTENSION_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json")
}

/// **VALUE**: Verifies the descriptor has the fields the browser requires.
///
/// **WHY THIS MATTERS**: The browser ignores a descriptor with any field
/// misnamed (`type`, `allowed_origins`) and reports the host as missing.
#[test]
fn given_fresh_machine_when_installed_then_descriptor_written() {
    // GIVEN: An empty hosts directory
    let dir = TempDir::new().expect("tempdir");
    let manifest_path = dir.path().join("hosts").join(format!("{HOST_NAME}.json"));
    let host_path = dir.path().join("leetcode-exporter-host");

    // WHEN: Installing
    install(&manifest_path, &host_path).expect("install");

    // THEN: Wire-exact fields with a placeholder origin
    let json = read_json(&manifest_path);
    assert_eq!(json["name"], HOST_NAME);
    assert_eq!(json["type"], HOST_TYPE);
    assert_eq!(json["path"], host_path.to_str().expect("utf-8 path"));
    assert_eq!(json["allowed_origins"].as_array().map(Vec::len), Some(1));
}

/// **VALUE**: Verifies register narrows the origins to one extension and a
/// later setup keeps it.
///
/// **BUG THIS CATCHES**: Would catch `setup` (run after an upgrade) resetting
/// the origin to the placeholder, which locks the extension out again.
#[test]
fn given_registered_extension_when_reinstalled_then_origin_kept() {
    // GIVEN: An installed descriptor
    let dir = TempDir::new().expect("tempdir");
    let manifest_path = dir.path().join(format!("{HOST_NAME}.json"));
    install(&manifest_path, &dir.path().join("host")).expect("install");

    // WHEN: Registering (with sloppy input), then installing again
    let id = register(&manifest_path, &format!("  {}  ", EXTENSION_ID.to_uppercase()))
        .expect("register");
    install(&manifest_path, &dir.path().join("host-v2")).expect("reinstall");

    // THEN: The registered origin survived, the path was updated
    let manifest = HostManifest::load(&manifest_path).expect("load");
    assert_eq!(id, EXTENSION_ID);
    assert_eq!(manifest.allowed_origins, vec![origin_for(EXTENSION_ID)]);
    assert!(manifest.allows(&format!("chrome-extension://{EXTENSION_ID}/")));
    assert_eq!(manifest.path, dir.path().join("host-v2"));
}

#[test]
fn given_malformed_id_when_registered_then_rejected() {
    // GIVEN: An installed descriptor
    let dir = TempDir::new().expect("tempdir");
    let manifest_path = dir.path().join(format!("{HOST_NAME}.json"));
    install(&manifest_path, &dir.path().join("host")).expect("install");

    // WHEN: Registering ids of the wrong shape
    let too_short = register(&manifest_path, "abc");
    let with_digits = register(&manifest_path, "abcdefghijklmnop0123456789abcdef");

    // THEN: Both rejected
    assert!(matches!(too_short, Err(ManifestError::InvalidExtensionId { .. })));
    assert!(matches!(with_digits, Err(ManifestError::InvalidExtensionId { .. })));
}

/// **VALUE**: Verifies register before setup says what to run.
#[test]
fn given_no_descriptor_when_registered_then_not_installed() {
    // GIVEN: No descriptor
    let dir = TempDir::new().expect("tempdir");
    let manifest_path = dir.path().join(format!("{HOST_NAME}.json"));

    // WHEN: Registering
    let result = register(&manifest_path, EXTENSION_ID);

    // THEN: NotInstalled with a hint
    match result {
        Err(e @ ManifestError::NotInstalled { .. }) => assert!(e.hint().is_some()),
        other => panic!("expected not installed, got {other:?}"),
    }
}

#[test]
fn given_installed_descriptor_when_uninstalled_twice_then_second_is_noop() {
    // GIVEN: An installed descriptor
    let dir = TempDir::new().expect("tempdir");
    let manifest_path = dir.path().join(format!("{HOST_NAME}.json"));
    install(&manifest_path, &dir.path().join("host")).expect("install");

    // WHEN: Uninstalling twice
    let first = uninstall(&manifest_path).expect("first");
    let second = uninstall(&manifest_path).expect("second");

    // THEN: Removed once
    assert!(first);
    assert!(!second);
    assert!(!manifest_path.exists());
}
