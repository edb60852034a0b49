use crate::{ModelError, ProblemRecord};

use serde_json::json;

/// **VALUE**: Verifies the record accepts the field names the page scraper uses.
///
/// **WHY THIS MATTERS**: The content script emits `titleSlug`, `codeSnippet`
/// and a numeric id. Rejecting those names would break the one-click export.
///
/// **BUG THIS CATCHES**: Would catch a dropped `alias` or an id field that no
/// longer accepts numbers.
#[test]
fn given_scraper_field_names_when_decoded_then_record_is_populated() {
    // GIVEN: JSON in the scraper's shape
    let raw = json!({
        "id": 1,
        "title": "Two Sum",
        "titleSlug": "two-sum",
        "difficulty": "Easy",
        "codeSnippet": "def twoSum(self, nums, target):",
        "language": "python3",
        "examples": [{ "input": "nums = [2,7,11,15], target = 9", "output": "[0,1]" }]
    });

    // WHEN: Decoding
    let record: ProblemRecord = serde_json::from_value(raw).expect("should decode");

    // THEN: Aliased fields are mapped
    assert_eq!(record.id.as_deref(), Some("1"));
    assert_eq!(record.slug.as_deref(), Some("two-sum"));
    assert_eq!(record.code.as_deref(), Some("def twoSum(self, nums, target):"));
    assert_eq!(record.examples.len(), 1);
    assert_eq!(record.display_name(), "two-sum");
    assert!(record.validate().is_ok());
}

/// **VALUE**: Verifies that a record with neither slug nor title is invalid.
#[test]
fn given_no_slug_and_no_title_when_validated_then_returns_error() {
    // GIVEN: A record with only a description
    let record = ProblemRecord {
        description: Some(String::from("Given an array...")),
        title: Some(String::from("   ")),
        ..Default::default()
    };

    // WHEN / THEN: Validation fails
    match record.validate() {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("slug or a title"));
        }
        Ok(()) => panic!("record without slug/title must be rejected"),
    }
}

/// **VALUE**: Verifies the title is used when the slug is missing.
#[test]
fn given_title_only_when_display_name_called_then_returns_title() {
    let record = ProblemRecord {
        title: Some(String::from("Two Sum")),
        ..Default::default()
    };

    assert!(record.validate().is_ok());
    assert_eq!(record.display_name(), "Two Sum");
}
