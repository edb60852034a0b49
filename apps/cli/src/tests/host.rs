// Unit tests for the host's watchdog override

use crate::host::watchdogs_from;

use client_core::ipc::Watchdogs;

use std::time::Duration;

/// **VALUE**: Verifies the read budget can be shortened from the environment
/// while the judge budget stays put.
#[test]
fn given_millisecond_override_when_parsed_then_read_budget_replaced() {
    // GIVEN/WHEN
    let watchdogs = watchdogs_from(Some(" 250 "));

    // THEN
    assert_eq!(watchdogs.read, Duration::from_millis(250));
    assert_eq!(watchdogs.judge, Watchdogs::default().judge);
}

/// **VALUE**: Verifies a malformed override is ignored rather than fatal.
///
/// **BUG THIS CATCHES**: Would catch a host that refuses to answer because of
/// a typo in its environment.
#[test]
fn given_bad_or_missing_override_when_parsed_then_defaults() {
    assert_eq!(watchdogs_from(Some("ten seconds")), Watchdogs::default());
    assert_eq!(watchdogs_from(None), Watchdogs::default());
}
