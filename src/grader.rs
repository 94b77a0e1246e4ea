#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Orchestration of a grading run: task detection, record grouping, and
//! flagged-file routing.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::Catalog,
    classify,
    grade::{HashPolicy, ScoreReport},
    submission::{AddOutcome, SubmissionRecord},
};

/// Conditions that abort a run before any record is built. Everything else is
/// captured per file or per requirement and never escapes.
#[derive(Debug, Error)]
pub enum RunError {
    /// The expanded input set was empty.
    #[error("no input files found")]
    NoInputFiles,
    /// The first file's task is absent from the catalog (or its name could
    /// not be parsed at all), so no requirement list exists to grade against.
    #[error("could not match `{0}` to any known assignment")]
    UnknownAssignment(String),
}

/// A completed pass over one batch of submission files.
#[derive(Debug)]
pub struct GradingRun {
    /// The assignment detected from the first input file.
    task:    String,
    /// Digest comparison policy for the whole run.
    policy:  HashPolicy,
    /// Records keyed by student id; iteration order is student order.
    records: BTreeMap<String, SubmissionRecord>,
    /// Files that could not be attributed to any record.
    flagged: Vec<PathBuf>,
}

impl GradingRun {
    /// Groups `files` into per-student records and attributes each file.
    ///
    /// The assignment is detected from the first file and its requirement
    /// list fetched from the embedded catalog; both failures are fatal.
    /// Attempt receipts are skipped. A file is flagged when its name cannot
    /// be parsed, its task is not the run's task, no requirement suffix
    /// matches it, or it is a log that cannot be read.
    pub fn execute(files: &[PathBuf], policy: HashPolicy) -> Result<GradingRun> {
        let Some(first) = files.first() else {
            return Err(RunError::NoInputFiles.into());
        };

        let task = classify::classify(first)
            .map(|c| c.task)
            .map_err(|e| RunError::UnknownAssignment(e.0))?;
        let spec = Catalog::builtin()?
            .assignment(&task)
            .ok_or(RunError::UnknownAssignment(task.clone()))?;

        let mut run = GradingRun {
            task,
            policy,
            records: BTreeMap::new(),
            flagged: Vec::new(),
        };

        for path in files {
            if classify::is_attempt_summary(path) {
                debug!("skipping attempt receipt {}", path.display());
                continue;
            }

            let classified = match classify::classify(path) {
                Ok(classified) => classified,
                Err(err) => {
                    debug!("flagging {}: {err}", path.display());
                    run.flagged.push(path.clone());
                    continue;
                }
            };

            if classified.task != run.task {
                run.flagged.push(path.clone());
                continue;
            }

            let record = run
                .records
                .entry(classified.student.clone())
                .or_insert_with(|| SubmissionRecord::new(classified.student, &spec.required));

            match record.add_file(path) {
                Ok(AddOutcome::Recorded) => {}
                Ok(AddOutcome::Unmatched) => run.flagged.push(path.clone()),
                Err(err) => {
                    warn!("flagging {}: {err:#}", path.display());
                    run.flagged.push(path.clone());
                }
            }
        }

        Ok(run)
    }

    /// The assignment this run graded against.
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Records in student order.
    pub fn records(&self) -> impl Iterator<Item = &SubmissionRecord> {
        self.records.values()
    }

    /// The record for one student, if any of their files were seen.
    pub fn record(&self, student: &str) -> Option<&SubmissionRecord> {
        self.records.get(student)
    }

    /// Grades every record, in student order.
    pub fn reports(&self) -> Vec<ScoreReport> {
        self.records
            .values()
            .map(|record| record.grade(self.policy))
            .collect()
    }

    /// Files that were never attributed to a record.
    pub fn flagged(&self) -> &[PathBuf] {
        &self.flagged
    }
}
