//! Reading an exported solution back for `test` and `submit`.

use crate::error::solution::SolutionError;
use crate::problem_file::SOLUTION_FILE_STEM;
use crate::problem_file::language::language_for_extension;
use crate::problem_file::render::TEST_CASES_HEADING;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

const PROBLEM_DIR_PATTERN: &str = r"^(?P<id>\d+)-(?P<slug>.+)$";
const INPUT_LINE_PATTERN: &str = r"(?i)Input:[ \t]*(?P<line>[^\n]+)";
const EXAMPLE_ONE_PATTERN: &str = r"(?is)Example\s*1:.*?Input:[ \t]*(?P<line>[^\n]+)";
const ASSIGNMENT_PATTERN: &str = r"(?:^|,)\s*\w+\s*=\s*";
const DIR_CAPTURE_ID: &str = "id";
const DIR_CAPTURE_SLUG: &str = "slug";
const LINE_CAPTURE: &str = "line";

static PROBLEM_DIR_REGEX: OnceLock<Regex> = OnceLock::new();
static INPUT_LINE_REGEX: OnceLock<Regex> = OnceLock::new();
static EXAMPLE_ONE_REGEX: OnceLock<Regex> = OnceLock::new();
static ASSIGNMENT_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_problem_dir_regex() -> &'static Regex {
    PROBLEM_DIR_REGEX.get_or_init(|| Regex::new(PROBLEM_DIR_PATTERN).expect("valid regex pattern"))
}

fn get_input_line_regex() -> &'static Regex {
    INPUT_LINE_REGEX.get_or_init(|| Regex::new(INPUT_LINE_PATTERN).expect("valid regex pattern"))
}

fn get_example_one_regex() -> &'static Regex {
    EXAMPLE_ONE_REGEX.get_or_init(|| Regex::new(EXAMPLE_ONE_PATTERN).expect("valid regex pattern"))
}

fn get_assignment_regex() -> &'static Regex {
    ASSIGNMENT_REGEX.get_or_init(|| Regex::new(ASSIGNMENT_PATTERN).expect("valid regex pattern"))
}

/// Everything the judge needs about a local solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionInfo {
    pub path: PathBuf,
    pub slug: String,
    pub question_id: Option<String>,
    pub language: String,
    pub code: String,
    /// Newline-separated values of the first example input, empty if none.
    pub test_input: String,
}

impl SolutionInfo {
    /// Question id or [`SolutionError::MissingQuestionId`].
    #[track_caller]
    pub fn require_question_id(&self) -> Result<&str, SolutionError> {
        self.question_id
            .as_deref()
            .ok_or_else(|| SolutionError::MissingQuestionId {
                dir: self.path.parent().map(Path::to_path_buf).unwrap_or_default(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Test input or [`SolutionError::MissingTestInput`].
    #[track_caller]
    pub fn require_test_input(&self) -> Result<&str, SolutionError> {
        if self.test_input.is_empty() {
            return Err(SolutionError::MissingTestInput {
                path: self.path.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(&self.test_input)
    }
}

/// The solution file for `target`: the file itself, or the first
/// `solution*` entry of a directory.
#[track_caller]
pub fn find_solution_file(target: &Path) -> Result<PathBuf, SolutionError> {
    if target.is_file() {
        return Ok(target.to_path_buf());
    }

    let entries = std::fs::read_dir(target).map_err(|e| SolutionError::read(target, e))?;
    let mut candidates: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(SOLUTION_FILE_STEM))
        })
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| SolutionError::NotFound {
            dir: target.to_path_buf(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Read a solution file and derive slug, id, language and test input.
pub fn load_solution(path: &Path) -> Result<SolutionInfo, SolutionError> {
    let code = std::fs::read_to_string(path).map_err(|e| SolutionError::read(path, e))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let language = language_for_extension(extension)
        .ok_or_else(|| SolutionError::UnsupportedLanguage {
            extension: format!(".{extension}"),
            location: ErrorLocation::from(Location::caller()),
        })?
        .to_string();

    let dir_name = std::path::absolute(path)
        .ok()
        .and_then(|p| {
            p.parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let (question_id, slug) = parse_problem_dir(&dir_name);
    let test_input = extract_test_input(&code);

    debug!("Loaded {} ({language}, slug {slug})", path.display());

    Ok(SolutionInfo {
        path: path.to_path_buf(),
        slug,
        question_id,
        language,
        code,
        test_input,
    })
}

/// `1-two-sum` yields `(Some("1"), "two-sum")`; anything else is all slug.
pub fn parse_problem_dir(dir_name: &str) -> (Option<String>, String) {
    match get_problem_dir_regex().captures(dir_name) {
        Some(caps) => (
            caps.name(DIR_CAPTURE_ID).map(|m| m.as_str().to_string()),
            caps.name(DIR_CAPTURE_SLUG)
                .map_or_else(|| dir_name.to_string(), |m| m.as_str().to_string()),
        ),
        None => (None, dir_name.to_string()),
    }
}

/// First example input as the judge expects it: one value per line.
///
/// Looks in the `Test Cases:` section first, then at `Example 1:` in the
/// description. Returns an empty string when neither yields a value.
pub fn extract_test_input(content: &str) -> String {
    if let Some(section) = test_cases_section(content) {
        for caps in get_input_line_regex().captures_iter(section) {
            let values = split_assignments(caps[LINE_CAPTURE].trim());
            if !values.is_empty() {
                return values.join("\n");
            }
        }
    }

    get_example_one_regex()
        .captures(content)
        .map(|caps| split_assignments(caps[LINE_CAPTURE].trim()).join("\n"))
        .unwrap_or_default()
}

/// Text after `Test Cases:` up to a blank line, a comment end or EOF.
fn test_cases_section(content: &str) -> Option<&str> {
    let lower = content.to_ascii_lowercase();
    let start = lower.find(&TEST_CASES_HEADING.to_ascii_lowercase())? + TEST_CASES_HEADING.len();
    let rest = content.get(start..)?;
    let end = [rest.find("\n\n"), rest.find("*/")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// `nums = [2,7,11,15], target = 9` yields `["[2,7,11,15]", "9"]`.
///
/// Commas inside a value are kept; only a comma followed by `name =` starts
/// the next value.
pub fn split_assignments(line: &str) -> Vec<String> {
    let starts: Vec<_> = get_assignment_regex().find_iter(line).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let end = starts.get(i + 1).map_or(line.len(), |next| next.start());
            line[m.end()..end].trim().to_string()
        })
        .filter(|value| !value.is_empty())
        .collect()
}
