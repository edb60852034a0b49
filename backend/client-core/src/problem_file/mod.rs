//! Writes an exported problem to `<workspace>/<id>-<slug>/solution<ext>`.

pub mod language;
pub mod render;

use crate::error::problem_file::ProblemFileError;
use crate::problem_file::language::{DEFAULT_LANGUAGE, extension_for};

use common::ErrorLocation;
use models::ProblemRecord;

use std::panic::Location;
use std::path::{Path, PathBuf};

use log::debug;

pub const SOLUTION_FILE_STEM: &str = "solution";
const MAX_SLUG_LEN: usize = 100;
const MAX_ID_LEN: usize = 10;
const UNKNOWN_SLUG: &str = "unknown";
const UNKNOWN_ID: &str = "0";

/// Lowercase, map anything outside `[a-z0-9-]` to `-`, collapse and trim
/// dashes, cap at 100 chars. Empty input becomes `unknown`.
pub fn sanitize_slug(name: Option<&str>) -> String {
    let Some(name) = name else {
        return UNKNOWN_SLUG.to_string();
    };

    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    let slug: String = slug.trim_matches('-').chars().take(MAX_SLUG_LEN).collect();
    if slug.is_empty() {
        UNKNOWN_SLUG.to_string()
    } else {
        slug
    }
}

/// Keep digits only, at most 10. Empty input becomes `0`.
pub fn sanitize_id(id: Option<&str>) -> String {
    let digits: String = id
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_ID_LEN)
        .collect();
    if digits.is_empty() {
        UNKNOWN_ID.to_string()
    } else {
        digits
    }
}

/// `<id>-<slug>`
pub fn problem_dir_name(record: &ProblemRecord) -> String {
    let id = sanitize_id(record.id.as_deref());
    let slug = sanitize_slug(record.slug.as_deref().or(record.title.as_deref()));
    format!("{id}-{slug}")
}

/// `solution<ext>` for the record's language.
pub fn solution_file_name(record: &ProblemRecord) -> String {
    let language = record.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    format!("{SOLUTION_FILE_STEM}{}", extension_for(language))
}

#[derive(Debug, Clone)]
pub struct ProblemFileWriter {
    workspace: PathBuf,
}

impl ProblemFileWriter {
    pub fn new(workspace: impl AsRef<Path>) -> Self {
        Self {
            workspace: workspace.as_ref().to_path_buf(),
        }
    }

    /// Render and write the file, returning its path.
    pub fn write(&self, record: &ProblemRecord) -> Result<PathBuf, ProblemFileError> {
        let workspace = std::path::absolute(&self.workspace)
            .map_err(|e| ProblemFileError::write(&self.workspace, e))?;
        let problem_dir = workspace.join(problem_dir_name(record));

        if !problem_dir.starts_with(&workspace) {
            return Err(ProblemFileError::OutsideWorkspace {
                path: problem_dir,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        std::fs::create_dir_all(&problem_dir)
            .map_err(|e| ProblemFileError::write(&problem_dir, e))?;

        let file_path = problem_dir.join(solution_file_name(record));
        let temp_path = problem_dir.join(format!(".{}.tmp", solution_file_name(record)));
        let content = render::render(record);

        std::fs::write(&temp_path, content).map_err(|e| ProblemFileError::write(&temp_path, e))?;
        std::fs::rename(&temp_path, &file_path)
            .map_err(|e| ProblemFileError::write(&file_path, e))?;

        debug!("Wrote {}", file_path.display());
        Ok(file_path)
    }
}
