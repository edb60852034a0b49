use crate::RedactedToken;

/// **VALUE**: Ensures session secrets never leak through `{:?}` or `{}`.
///
/// **WHY THIS MATTERS**: The host logs every request it handles. If a token
/// printed itself, the debug log would contain a live LeetCode session.
///
/// **BUG THIS CATCHES**: Would catch a derived `Debug` replacing the manual impl.
#[test]
fn given_token_when_formatted_then_value_is_hidden() {
    // GIVEN: A token with a recognisable value
    let token = RedactedToken::new("super-secret-session");

    // WHEN: Formatting it both ways
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither output contains the secret
    assert!(!debug.contains("super-secret-session"));
    assert!(!display.contains("super-secret-session"));
    assert_eq!(token.as_str(), "super-secret-session");
    assert_eq!(token.len(), 20);
}

/// **VALUE**: Verifies that serializing a token is refused.
///
/// **BUG THIS CATCHES**: Would catch if a token ends up inside a Response that
/// is written back to the browser extension.
#[test]
fn given_token_when_serialized_then_fails() {
    let token = RedactedToken::new("abc");

    let result = serde_json::to_string(&token);

    let message = result.expect_err("RedactedToken must refuse serialization").to_string();
    assert!(message.contains("RedactedToken cannot be serialized"));
}
