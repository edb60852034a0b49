use crate::problem_file::language::{comment_style_for, extension_for, language_for_extension};
use crate::problem_file::render::{
    CODE_PLACEHOLDER, MAX_CODE_BYTES, TRUNCATION_MARKER, render, strip_html, truncate_code,
    wrap_text,
};
use crate::problem_file::{problem_dir_name, sanitize_id, sanitize_slug, solution_file_name};

use models::{ProblemRecord, TestCase};

fn two_sum() -> ProblemRecord {
    ProblemRecord {
        id: Some(String::from("1")),
        title: Some(String::from("Two Sum")),
        slug: Some(String::from("two-sum")),
        description: Some(String::from(
            "<p>Given an array of integers <code>nums</code>&nbsp;and an integer <code>target</code>.</p>",
        )),
        difficulty: Some(String::from("Easy")),
        code: Some(String::from("class Solution:\n    pass\n")),
        language: Some(String::from("python3")),
        examples: vec![TestCase {
            input: String::from("nums = [2,7,11,15], target = 9"),
            output: String::from("[0,1]"),
            explanation: None,
        }],
        url: None,
    }
}

/// **VALUE**: Verifies slug sanitization cannot produce path separators or dots.
///
/// **WHY THIS MATTERS**: The slug comes from an untrusted page and becomes a
/// directory name. `../` in it would write outside the workspace.
///
/// **BUG THIS CATCHES**: Would catch a sanitizer that allows `.` or `/`.
#[test]
fn given_hostile_slugs_when_sanitized_then_only_safe_chars_remain() {
    assert_eq!(sanitize_slug(Some("../../etc/passwd")), "etc-passwd");
    assert_eq!(sanitize_slug(Some("Two  Sum!!")), "two-sum");
    assert_eq!(sanitize_slug(Some("---")), "unknown");
    assert_eq!(sanitize_slug(None), "unknown");
    assert_eq!(sanitize_slug(Some(&"a".repeat(150))).len(), 100);
}

#[test]
fn given_various_ids_when_sanitized_then_digits_only_and_capped() {
    assert_eq!(sanitize_id(Some("1")), "1");
    assert_eq!(sanitize_id(Some("12a3")), "123");
    assert_eq!(sanitize_id(Some("12345678901234")), "1234567890");
    assert_eq!(sanitize_id(Some("abc")), "0");
    assert_eq!(sanitize_id(None), "0");
}

#[test]
fn given_record_when_names_built_then_dir_and_file_match_layout() {
    let record = two_sum();

    assert_eq!(problem_dir_name(&record), "1-two-sum");
    assert_eq!(solution_file_name(&record), "solution.py");
}

/// **VALUE**: Verifies language lookups and their fallbacks.
#[test]
fn given_languages_when_looked_up_then_extension_and_style_match() {
    assert_eq!(extension_for("Python3"), ".py");
    assert_eq!(extension_for("c++"), ".cpp");
    assert_eq!(extension_for("cobol"), ".txt");
    assert_eq!(comment_style_for("ruby").start, "=begin");
    assert_eq!(comment_style_for("cobol").start, "/*");
    assert_eq!(language_for_extension(".py"), Some("python3"));
    assert_eq!(language_for_extension("go"), Some("golang"));
    assert_eq!(language_for_extension(".md"), None);
}

#[test]
fn given_html_when_stripped_then_tags_removed_and_entities_decoded() {
    let text = strip_html("<p>a &lt; b &amp;&amp; c&nbsp;&gt; d &quot;x&quot; &#39;y&#39;</p>");

    assert_eq!(text, "a < b && c > d \"x\" 'y'");
}

/// **VALUE**: Verifies wrapping keeps lines within the width.
#[test]
fn given_long_paragraphs_when_wrapped_then_lines_fit_width() {
    let text = format!("{}\n\nsecond paragraph", "word ".repeat(40));

    let lines = wrap_text(&text, 20);

    assert!(lines.iter().all(|l| l.len() <= 20));
    assert!(lines.contains(&String::from("second paragraph")));
    assert_eq!(lines.last(), Some(&String::new()));
}

/// **VALUE**: Verifies oversized code is cut and marked.
#[test]
fn given_oversized_code_when_truncated_then_marker_appended() {
    let code = "é".repeat(MAX_CODE_BYTES);

    let truncated = truncate_code(&code);

    assert!(truncated.ends_with(TRUNCATION_MARKER));
    assert!(truncated.len() <= MAX_CODE_BYTES + TRUNCATION_MARKER.len());
}

/// **VALUE**: Verifies the full file layout.
///
/// **WHY THIS MATTERS**: `test` reads the `Test Cases:` section back out of
/// this header. A layout change here breaks the CLI round trip.
#[test]
fn given_record_when_rendered_then_header_and_code_present() {
    let content = render(&two_sum());

    assert!(content.starts_with("\"\"\"\n * Problem: Two Sum\n * Difficulty: Easy\n"));
    assert!(content.contains(" * URL: https://leetcode.com/problems/two-sum/\n"));
    assert!(content.contains(" * Given an array of integers nums and an integer target.\n"));
    assert!(content.contains(" * Test Cases:\n * Input: nums = [2,7,11,15], target = 9\n * Output: [0,1]\n"));
    assert!(content.ends_with("\"\"\"\n\nclass Solution:\n    pass\n"));
}

#[test]
fn given_record_without_code_when_rendered_then_placeholder_used() {
    let record = ProblemRecord {
        slug: Some(String::from("x")),
        ..Default::default()
    };

    let content = render(&record);

    assert!(content.ends_with(CODE_PLACEHOLDER));
    assert!(content.starts_with("/*\n"));
}
