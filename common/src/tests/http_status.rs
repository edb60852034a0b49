use crate::HttpStatusCode;

/// **VALUE**: Verifies the retry classification the judge poller relies on.
///
/// **WHY THIS MATTERS**: A poll that hits a gateway hiccup should count as a
/// pending attempt, while a 400 must abort the job immediately.
///
/// **BUG THIS CATCHES**: Would catch if someone widens `is_retryable()` to all
/// 5xx/4xx codes or drops 429 from the transient set.
#[test]
fn given_status_codes_when_classified_then_only_transient_ones_are_retryable() {
    // GIVEN: A mix of transient and permanent codes
    let transient = [429, 502, 503, 504];
    let permanent = [400, 401, 403, 404, 500];

    // WHEN / THEN: Only the transient set is retryable
    for code in transient {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }
    for code in permanent {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}

/// **VALUE**: Verifies that expired-session responses are recognised.
///
/// **BUG THIS CATCHES**: Would catch if 403 stops mapping to an auth failure,
/// which would surface "Request failed: 403" instead of the re-login hint.
#[test]
fn given_401_or_403_when_checked_then_is_auth_failure() {
    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(404).is_auth_failure());
    assert!(HttpStatusCode(404).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
}
