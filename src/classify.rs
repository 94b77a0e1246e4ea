#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Splitting LMS download names into task, student, and logical file name.
//!
//! Blackboard-style downloads name every file
//! `<task>_<student>_attempt_<timestamp>_<name>.<ext>`. Only the first,
//! second, and last fields carry information we use.

use std::{path::Path, sync::OnceLock};

use glob::Pattern;
use regex::Regex;
use thiserror::Error;

/// The parts of a structured submission file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    /// Assignment identifier, eg. `Lab 6`.
    pub task:         String,
    /// Student identifier the LMS inserted into the name.
    pub student:      String,
    /// Logical deliverable name with its extension re-attached, eg.
    /// `lab6a.py`.
    pub logical_name: String,
}

/// A file name that does not follow the delimited submission form. Carries the
/// bare file name so callers can flag the file instead of dropping it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("file name `{0}` does not follow the <task>_<student>_..._<name> form")]
pub struct NameParseError(pub String);

/// Splits a path's file name into its submission fields.
///
/// Fewer than two `_`-delimited fields is a recoverable condition: the caller
/// routes such files to the flagged list.
pub fn classify(path: &Path) -> Result<ClassifiedFile, NameParseError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let fields: Vec<&str> = stem.split('_').collect();
    if fields.len() < 2 {
        return Err(NameParseError(file_name));
    }

    let last = fields[fields.len() - 1];
    let logical_name = match path.extension() {
        Some(ext) => format!("{last}.{}", ext.to_string_lossy()),
        None => last.to_string(),
    };

    Ok(ClassifiedFile {
        task: fields[0].to_string(),
        student: fields[1].to_string(),
        logical_name,
    })
}

/// Suffix pattern identifying a student-produced check-output log.
fn check_output_pattern() -> &'static Pattern {
    static PATTERN: OnceLock<Pattern> = OnceLock::new();
    PATTERN.get_or_init(|| Pattern::new("*-check-output.txt").expect("valid glob pattern"))
}

/// True iff `path` names a check-output log (`*-check-output.txt`,
/// case-sensitive).
pub fn is_check_output_log(path: &Path) -> bool {
    check_output_pattern().matches(&path.to_string_lossy())
}

/// Shape of the timestamp-suffixed attempt receipts the LMS writes alongside
/// real submissions, eg. `..._attempt_2024-10-01-13-05-22.txt`.
fn attempt_summary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"attempt_\d{4}(-\d{2}){5}\.txt").expect("valid regex"))
}

/// True iff `path` names an attempt receipt rather than a deliverable. These
/// administrative files are skipped before grading, not flagged.
pub fn is_attempt_summary(path: &Path) -> bool {
    attempt_summary_re().is_match(&path.to_string_lossy())
}
