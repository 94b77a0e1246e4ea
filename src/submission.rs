#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-student submission records.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;

use crate::classify;

/// What happened to a file offered to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The file matched a required logical name and its path was recorded.
    Recorded,
    /// No requirement matched; the caller should flag the file.
    Unmatched,
}

/// Everything discovered for one student: resolved paths for required files
/// and the raw text of their check-output log.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    /// Student identifier, unique per grading run.
    student:      String,
    /// Required logical names, in the order the assignment lists them.
    requirements: Vec<String>,
    /// Resolved path per logical name. A later duplicate for the same name
    /// silently overwrites the earlier path.
    filepaths:    BTreeMap<String, PathBuf>,
    /// Full text of the discovered check-output log. Last one wins.
    check_output: Option<String>,
}

impl SubmissionRecord {
    /// Creates an empty record for `student` against an assignment's
    /// requirement list.
    pub fn new(student: impl Into<String>, requirements: &[String]) -> Self {
        Self {
            student:      student.into(),
            requirements: requirements.to_vec(),
            filepaths:    BTreeMap::new(),
            check_output: None,
        }
    }

    /// The student this record belongs to.
    pub fn student(&self) -> &str {
        &self.student
    }

    /// Required logical names, in assignment order.
    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// The resolved path for a logical name, if one was found.
    pub fn path_for(&self, name: &str) -> Option<&Path> {
        self.filepaths.get(name).map(PathBuf::as_path)
    }

    /// Raw text of the student's check-output log, if one was found.
    pub fn check_output(&self) -> Option<&str> {
        self.check_output.as_deref()
    }

    /// Offers a file to this record.
    ///
    /// A check-output log has its full text stored regardless of whether the
    /// path also matches a requirement. Independently, the path is tested
    /// against each required logical name as a suffix; the first match records
    /// the path. `Unmatched` is a per-file recoverable condition, as is an
    /// unreadable log (returned as an error for the caller to flag).
    pub fn add_file(&mut self, path: &Path) -> Result<AddOutcome> {
        if classify::is_check_output_log(path) {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            self.check_output = Some(text);
        }

        let path_str = path.to_string_lossy();
        for requirement in &self.requirements {
            let pattern = Pattern::new(&format!("*{requirement}"))
                .with_context(|| format!("Requirement `{requirement}` is not a valid pattern"))?;
            if pattern.matches(&path_str) {
                self.filepaths.insert(requirement.clone(), path.to_path_buf());
                return Ok(AddOutcome::Recorded);
            }
        }

        Ok(AddOutcome::Unmatched)
    }
}
