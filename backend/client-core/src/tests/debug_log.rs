use crate::ipc::debug_log::{RotatingLogFile, debug_enabled_from, rotated_path};

use std::io::Write;

/// **VALUE**: Verifies that only an explicit `0` turns the debug log off.
///
/// **BUG THIS CATCHES**: Would catch inverting the check, which would leave
/// users with no log to attach to bug reports by default.
#[test]
fn given_env_values_when_checked_then_only_zero_disables() {
    assert!(debug_enabled_from(None));
    assert!(debug_enabled_from(Some("1")));
    assert!(debug_enabled_from(Some("")));
    assert!(!debug_enabled_from(Some("0")));
    assert!(!debug_enabled_from(Some(" 0 ")));
}

/// **VALUE**: Verifies that the log rotates to `<log>.old` once it would pass the cap.
///
/// **WHY THIS MATTERS**: The host logs every request. Without rotation the
/// file grows for as long as the extension is installed.
///
/// **BUG THIS CATCHES**: Would catch rotation that deletes instead of renaming,
/// or a writer that keeps appending to the renamed file handle.
#[test]
fn given_full_log_when_written_then_rotates_to_old_file() {
    // GIVEN: A log capped at 32 bytes that already holds 30
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("host.log");
    let mut log = RotatingLogFile::open(&path, 32).expect("open");
    log.write_all(b"first generation line ........\n").expect("write");

    // WHEN: Writing a line that would exceed the cap
    log.write_all(b"second\n").expect("write");
    log.flush().expect("flush");

    // THEN: Old content moved aside, new content in a fresh file
    let old = std::fs::read_to_string(rotated_path(&path)).expect("old file");
    let current = std::fs::read_to_string(&path).expect("current file");
    assert!(old.starts_with("first generation"));
    assert_eq!(current, "second\n");
}

/// **VALUE**: Verifies only one old generation is kept.
#[test]
fn given_existing_old_file_when_rotating_again_then_old_is_replaced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("host.log");
    let mut log = RotatingLogFile::open(&path, 8).expect("open");

    log.write_all(b"aaaaaaa\n").expect("write");
    log.write_all(b"bbbbbbb\n").expect("write");
    log.write_all(b"ccccccc\n").expect("write");
    log.flush().expect("flush");

    let old = std::fs::read_to_string(rotated_path(&path)).expect("old file");
    assert_eq!(old, "bbbbbbb\n");
    assert!(!dir.path().join("host.log.old.old").exists());
}

/// **VALUE**: Verifies that reopening an existing log accounts for its size.
#[test]
fn given_existing_log_when_reopened_then_size_counts_toward_cap() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("host.log");
    std::fs::write(&path, b"0123456789").expect("seed");

    let mut log = RotatingLogFile::open(&path, 12).expect("open");
    log.write_all(b"abc").expect("write");
    log.flush().expect("flush");

    assert!(rotated_path(&path).exists());
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "abc");
}
