use crate::solution::{extract_test_input, parse_problem_dir, split_assignments};

/// **VALUE**: Verifies commas inside a value do not split it.
///
/// **WHY THIS MATTERS**: Almost every input has an array argument. Splitting
/// on every comma would send `[2` and `7` as separate arguments.
#[test]
fn given_array_and_scalar_when_split_then_two_values() {
    let values = split_assignments("nums = [2,7,11,15], target = 9");

    assert_eq!(values, vec!["[2,7,11,15]", "9"]);
}

#[test]
fn given_string_values_when_split_then_quotes_kept() {
    let values = split_assignments(r#"s = "a,b", k = 2, words = ["x","y"]"#);

    assert_eq!(values, vec![r#""a,b""#, "2", r#"["x","y"]"#]);
}

#[test]
fn given_no_assignments_when_split_then_empty() {
    assert!(split_assignments("[1,2,3]").is_empty());
}

/// **VALUE**: Verifies the `Test Cases:` section wins over description examples.
#[test]
fn given_test_cases_section_when_extracted_then_first_input_used() {
    let content = "/*\n * Example 1: Input: a = 1\n * Test Cases:\n * Input: nums = [3,3], target = 6\n * Output: [0,1]\n * Input: nums = [1], target = 1\n */\ncode";

    assert_eq!(extract_test_input(content), "[3,3]\n6");
}

/// **VALUE**: Verifies the fallback to `Example 1:` in the description.
#[test]
fn given_only_description_example_when_extracted_then_example_input_used() {
    let content = "/*\n * Example 1:\n *\n * Input: s = \"abc\"\n * Output: 3\n */";

    assert_eq!(extract_test_input(content), "\"abc\"");
}

#[test]
fn given_no_examples_when_extracted_then_empty() {
    assert_eq!(extract_test_input("// nothing here"), "");
}

#[test]
fn given_problem_dir_names_when_parsed_then_id_and_slug_split() {
    assert_eq!(
        parse_problem_dir("1-two-sum"),
        (Some(String::from("1")), String::from("two-sum"))
    );
    assert_eq!(
        parse_problem_dir("scratch"),
        (None, String::from("scratch"))
    );
}
