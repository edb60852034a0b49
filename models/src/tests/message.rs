use crate::{ConfigView, Request, Response};

use serde_json::json;

/// **VALUE**: Verifies the camelCase wire shape the extension sends.
///
/// **WHY THIS MATTERS**: The extension is written against `questionId` and
/// `testCases`. A snake_case field here would make every test request fail
/// to decode on the host side.
///
/// **BUG THIS CATCHES**: Would catch removal of `rename_all_fields`.
#[test]
fn given_test_solution_json_when_decoded_then_fields_map() {
    // GIVEN: A testSolution request as the extension writes it
    let raw = json!({
        "action": "testSolution",
        "slug": "two-sum",
        "questionId": "1",
        "code": "class Solution {}",
        "language": "java",
        "testCases": "[2,7,11,15]\n9"
    });

    // WHEN: Decoding
    let request: Request = serde_json::from_value(raw).expect("should decode");

    // THEN: All fields land where expected
    match request {
        Request::TestSolution {
            slug,
            question_id,
            test_cases,
            ..
        } => {
            assert_eq!(slug, "two-sum");
            assert_eq!(question_id, "1");
            assert_eq!(test_cases, "[2,7,11,15]\n9");
        }
        other => panic!("unexpected request {other:?}"),
    }
}

/// **VALUE**: Verifies that unknown actions are rejected rather than ignored.
///
/// **BUG THIS CATCHES**: Would catch an `#[serde(other)]` catch-all sneaking
/// into the enum, which would turn typos into silent no-ops.
#[test]
fn given_unknown_action_when_decoded_then_fails() {
    let raw = json!({ "action": "deleteEverything" });

    let result = serde_json::from_value::<Request>(raw);

    assert!(result.is_err(), "unknown actions must be rejected");
}

/// **VALUE**: Verifies a bare `getConfig` request decodes and reports its name.
#[test]
fn given_get_config_json_when_decoded_then_action_name_matches() {
    let request: Request =
        serde_json::from_value(json!({ "action": "getConfig" })).expect("should decode");

    assert_eq!(request, Request::GetConfig);
    assert_eq!(request.action(), "getConfig");
    assert!(!request.is_judge_job());
}

/// **VALUE**: Verifies failure responses omit success-only fields.
///
/// **WHY THIS MATTERS**: The extension checks `response.filePath` to decide
/// whether a file was written. A `null` would read as present in some code paths.
#[test]
fn given_failure_response_when_serialized_then_only_error_fields_present() {
    // GIVEN: A failure with a hint
    let response = Response::failure("Invalid JSON").with_hint("Check the extension version");

    // WHEN: Serializing
    let value = serde_json::to_value(&response).expect("should serialize");

    // THEN: Only success/error/hint keys
    assert_eq!(
        value,
        json!({
            "success": false,
            "error": "Invalid JSON",
            "hint": "Check the extension version"
        })
    );
}

/// **VALUE**: Verifies extra settings are flattened next to the known keys.
#[test]
fn given_config_view_with_extra_key_when_serialized_then_key_is_top_level() {
    let mut view = ConfigView {
        workspace_dir: String::from("/tmp/x"),
        editor: String::from("auto"),
        ..Default::default()
    };
    view.extra.insert(String::from("theme"), json!("dark"));

    let value = serde_json::to_value(&view).expect("should serialize");

    assert_eq!(value["workspaceDir"], "/tmp/x");
    assert_eq!(value["theme"], "dark");
    assert_eq!(value["hasSession"], false);
}

/// **VALUE**: Verifies a numeric `questionId` is accepted and kept as text.
///
/// **WHY THIS MATTERS**: Some page layouts expose the question id as a JSON
/// number. Rejecting it would fail every test and submit from those pages
/// with an opaque "Invalid request".
#[test]
fn given_numeric_question_id_when_decoded_then_kept_as_string() {
    // GIVEN: A submitSolution request with a numeric questionId
    let raw = json!({
        "action": "submitSolution",
        "slug": "two-sum",
        "questionId": 1,
        "code": "class Solution {}",
        "language": "java"
    });

    // WHEN: Decoding
    let request: Request = serde_json::from_value(raw).expect("should decode");

    // THEN: The id is the decimal text
    match request {
        Request::SubmitSolution { question_id, .. } => assert_eq!(question_id, "1"),
        other => panic!("unexpected request {other:?}"),
    }
}

/// **VALUE**: Verifies a `questionId` that is neither text nor a number is
/// still rejected.
#[test]
fn given_object_question_id_when_decoded_then_fails() {
    let raw = json!({
        "action": "testSolution",
        "slug": "two-sum",
        "questionId": { "id": 1 },
        "code": "pass",
        "language": "python3",
        "testCases": ""
    });

    let result = serde_json::from_value::<Request>(raw);

    assert!(result.is_err());
}

/// **VALUE**: Verifies "no editor" survives a decode as an explicit `null`.
///
/// **BUG THIS CATCHES**: Would catch the relay collapsing `editor: null`
/// into a missing key when it re-prints the host's answer.
#[test]
fn given_null_editor_when_round_tripped_then_null_kept() {
    // GIVEN: An openProblem reply where no editor launched
    let response = Response::ok().with_file_path("/tmp/two-sum.py").without_editor();

    // WHEN: Serializing and decoding again
    let value = serde_json::to_value(&response).expect("should serialize");
    let decoded: Response = serde_json::from_value(value.clone()).expect("should decode");

    // THEN: `editor` is present and null on both sides
    assert_eq!(value["editor"], serde_json::Value::Null);
    assert!(value.as_object().expect("object").contains_key("editor"));
    assert_eq!(decoded.editor, Some(None));
    assert_eq!(decoded.editor_name(), None);
}
