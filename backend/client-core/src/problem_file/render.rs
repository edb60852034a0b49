//! File content for an exported problem.

use crate::LEETCODE_BASE_URL;
use crate::problem_file::language::{DEFAULT_LANGUAGE, comment_style_for};
use crate::problem_file::sanitize_slug;

use models::ProblemRecord;

use std::sync::OnceLock;

use regex::Regex;

pub const MAX_CODE_BYTES: usize = 100 * 1024;
pub const TRUNCATION_MARKER: &str = "\n// ... truncated";
pub const CODE_PLACEHOLDER: &str = "// Write your solution here\n";
pub const TEST_CASES_HEADING: &str = "Test Cases:";
const WRAP_WIDTH: usize = 76;
const HTML_TAG_PATTERN: &str = r"<[^>]*>";
const PARAGRAPH_BREAK_PATTERN: &str = r"\n\s*\n";

static HTML_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_BREAK_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_html_tag_regex() -> &'static Regex {
    HTML_TAG_REGEX.get_or_init(|| Regex::new(HTML_TAG_PATTERN).expect("valid regex pattern"))
}

fn get_paragraph_break_regex() -> &'static Regex {
    PARAGRAPH_BREAK_REGEX
        .get_or_init(|| Regex::new(PARAGRAPH_BREAK_PATTERN).expect("valid regex pattern"))
}

/// Drop tags and decode the handful of entities problem pages use.
pub fn strip_html(html: &str) -> String {
    get_html_tag_regex()
        .replace_all(html, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Greedy word wrap. Paragraphs are separated by one empty line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in get_paragraph_break_regex().split(text) {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && line.len() + word.len() + 1 > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines.push(String::new());
    }

    lines
}

/// Cut oversized code at a char boundary and mark the cut.
pub fn truncate_code(code: &str) -> String {
    if code.len() <= MAX_CODE_BYTES {
        return code.to_string();
    }
    let mut end = MAX_CODE_BYTES;
    while !code.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{TRUNCATION_MARKER}", &code[..end])
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header comment: title, difficulty, URL, description and the examples.
pub fn header_comment(record: &ProblemRecord) -> String {
    let language = record.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let style = comment_style_for(language);
    let slug = sanitize_slug(record.slug.as_deref().or(record.title.as_deref()));
    let description = strip_html(record.description.as_deref().unwrap_or_default());

    let mut lines = vec![
        style.start.to_string(),
        format!(" * Problem: {}", record.title.as_deref().unwrap_or(record.display_name())),
        format!(
            " * Difficulty: {}",
            record.difficulty.as_deref().unwrap_or("Unknown")
        ),
        format!(" * URL: {LEETCODE_BASE_URL}/problems/{slug}/"),
        String::from(" *"),
        String::from(" * Description:"),
    ];
    lines.extend(
        wrap_text(&description, WRAP_WIDTH)
            .iter()
            .map(|l| format!(" * {l}").trim_end().to_string()),
    );

    if !record.examples.is_empty() {
        lines.push(format!(" * {TEST_CASES_HEADING}"));
        for example in &record.examples {
            lines.push(format!(" * Input: {}", single_line(&example.input)));
            lines.push(format!(" * Output: {}", single_line(&example.output)));
        }
        lines.push(String::from(" *"));
    }

    lines.push(style.end.to_string());
    lines.push(String::new());
    lines.join("\n")
}

/// Complete file: header, blank line, then the starter code or a placeholder.
pub fn render(record: &ProblemRecord) -> String {
    let code = match record.code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => truncate_code(code),
        None => CODE_PLACEHOLDER.to_string(),
    };
    format!("{}\n{code}", header_comment(record))
}
