use leetcode_exporter::commands::CommandOutcome;
use leetcode_exporter::commands::setup::{register, setup, uninstall};

use client_core::config::{MemoryConfigStore, UserConfig};
use client_core::editor::CommandRunner;
use client_core::manifest::{HostManifest, origin_for};

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::TempDir;

// ============================================================================
// `setup`, `register` and `uninstall` in a scratch home
// ============================================================================

const EXTENSION_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

/// Records launches; succeeds only when `succeed` is set.
#[derive(Default)]
struct BrowserRunner {
    succeed: bool,
    launched: Mutex<Vec<(String, Vec<String>)>>,
}

impl CommandRunner for BrowserRunner {
    async fn run(&self, program: &str, args: &[String]) -> io::Result<Option<i32>> {
        self.launched
            .lock()
            .expect("lock")
            .push((program.to_string(), args.to_vec()));
        if self.succeed {
            Ok(Some(0))
        } else {
            Err(io::Error::new(ErrorKind::NotFound, "not found"))
        }
    }
}

struct Scratch {
    _dir: TempDir,
    workspace: PathBuf,
    manifest: PathBuf,
    host: PathBuf,
    store: MemoryConfigStore,
}

fn scratch() -> Scratch {
    let dir = TempDir::new().unwrap();
    let workspace = dir.path().join("leetcode");
    let store = MemoryConfigStore::new(UserConfig {
        workspace_dir: workspace.to_string_lossy().into_owned(),
        ..Default::default()
    });
    Scratch {
        manifest: dir.path().join("hosts").join("com.leetcode.exporter.json"),
        host: dir.path().join("bin").join("leetcode-exporter-host"),
        workspace,
        store,
        _dir: dir,
    }
}

/// **VALUE**: Verifies setup creates the workspace and writes the descriptor.
///
/// **WHY THIS MATTERS**: Without the descriptor the browser cannot find the
/// host and every extension action fails.
///
/// **BUG THIS CATCHES**: Would catch setup aborting because the host binary is
/// not there yet, instead of warning.
#[tokio::test]
async fn given_fresh_home_when_setup_then_workspace_and_descriptor_created() {
    // GIVEN: No workspace, no descriptor, no host binary
    let s = scratch();
    let mut out = Vec::new();

    // WHEN: Running setup without opening the browser
    let outcome = setup(&s.store, &s.manifest, &s.host, None::<&BrowserRunner>, &mut out)
        .await
        .unwrap();

    // THEN
    let text = String::from_utf8(out).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);
    assert!(s.workspace.is_dir());
    assert!(text.contains("Created workspace"));
    assert!(text.contains("Warning: host binary not found"));
    let manifest = HostManifest::load(&s.manifest).unwrap();
    assert_eq!(manifest.path, s.host);
}

/// **VALUE**: Verifies a failed browser launch falls back to instructions.
///
/// **BUG THIS CATCHES**: Would catch setup failing when Chrome is not installed
/// under any expected name.
#[tokio::test]
async fn given_browser_missing_when_setup_opens_extensions_then_manual_instructions() {
    // GIVEN: A runner for which every launch fails
    let s = scratch();
    let runner = BrowserRunner::default();
    let mut out = Vec::new();

    // WHEN
    let outcome = setup(&s.store, &s.manifest, &s.host, Some(&runner), &mut out)
        .await
        .unwrap();

    // THEN: Still successful, with the manual path printed
    let text = String::from_utf8(out).unwrap();
    assert_eq!(outcome, CommandOutcome::Success);
    assert!(text.contains("Could not open Chrome automatically."));
    assert!(!runner.launched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_browser_available_when_setup_opens_extensions_then_page_url_passed() {
    // GIVEN: A runner that launches anything
    let s = scratch();
    let runner = BrowserRunner {
        succeed: true,
        ..Default::default()
    };
    let mut out = Vec::new();

    // WHEN
    setup(&s.store, &s.manifest, &s.host, Some(&runner), &mut out)
        .await
        .unwrap();

    // THEN: One launch, carrying the extensions page URL
    let launched = runner.launched.lock().unwrap();
    assert_eq!(launched.len(), 1);
    assert!(launched[0].1.iter().any(|a| a == "chrome://extensions"));
    assert!(!String::from_utf8(out).unwrap().contains("Could not open"));
}

/// **VALUE**: Verifies register narrows the origins and setup keeps them.
///
/// **WHY THIS MATTERS**: Re-running setup after an upgrade must not lock out
/// the extension the user already registered.
///
/// **BUG THIS CATCHES**: Would catch setup resetting origins to the placeholder.
#[tokio::test]
async fn given_registered_extension_when_setup_rerun_then_origin_kept() {
    // GIVEN: Setup then register
    let s = scratch();
    let mut out = Vec::new();
    setup(&s.store, &s.manifest, &s.host, None::<&BrowserRunner>, &mut out)
        .await
        .unwrap();
    register(&s.manifest, &EXTENSION_ID.to_uppercase(), &mut out).unwrap();

    // WHEN: Setup again
    setup(&s.store, &s.manifest, &s.host, None::<&BrowserRunner>, &mut out)
        .await
        .unwrap();

    // THEN
    let manifest = HostManifest::load(&s.manifest).unwrap();
    assert_eq!(manifest.allowed_origins, vec![origin_for(EXTENSION_ID)]);
    assert!(String::from_utf8(out).unwrap().contains(&format!("ID: {EXTENSION_ID}")));
}

#[test]
fn given_malformed_id_when_registered_then_error_with_hint() {
    // GIVEN: An installed descriptor
    let s = scratch();
    client_core::manifest::install(&s.manifest, &s.host).unwrap();
    let mut out = Vec::new();

    // WHEN
    let err = register(&s.manifest, "not-an-id", &mut out).unwrap_err();

    // THEN: Descriptor unchanged
    assert!(err.summary().contains("not-an-id"));
    let manifest = HostManifest::load(&s.manifest).unwrap();
    assert_ne!(manifest.allowed_origins, vec![origin_for("not-an-id")]);
}

/// **VALUE**: Verifies uninstall is idempotent and says what happened.
#[test]
fn given_installed_when_uninstalled_twice_then_second_reports_not_registered() {
    // GIVEN
    let s = scratch();
    client_core::manifest::install(&s.manifest, &s.host).unwrap();

    // WHEN
    let mut first = Vec::new();
    let mut second = Vec::new();
    uninstall(&s.manifest, &mut first).unwrap();
    uninstall(&s.manifest, &mut second).unwrap();

    // THEN
    assert!(!s.manifest.exists());
    assert!(String::from_utf8(first).unwrap().contains("Removed:"));
    assert!(
        String::from_utf8(second)
            .unwrap()
            .contains("Native messaging host was not registered")
    );
}
