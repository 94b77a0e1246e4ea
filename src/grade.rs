#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The scoring core: requirement kinds, verification checks, and the tiered
//! deduction policy.
//!
//! Grading is a pure function of record state and policy. Every call to
//! [`SubmissionRecord::grade`] rebuilds the report and its notes from
//! structured check results, so repeated calls yield identical output.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::{
    checksum::{self, LogHashes},
    submission::SubmissionRecord,
};

/// Every submission is scored out of this many points.
pub const OUT_OF: u8 = 5;

/// Note attached when no check-output log was found among a student's files.
pub const NO_OUTPUT_NOTE: &str = "Output file not found. Recommend manual testing";

/// Shape of a required lab script name, eg. `lab6a.py`.
fn lab_script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^lab\d[a-z]\.py$").expect("valid regex"))
}

/// Shape of a challenge script name, eg. `challenge6.py`.
fn challenge_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^challenge\d\.py$").expect("valid regex"))
}

/// What a required logical name is, by its shape. The kind decides which
/// checks run and how failure is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// A required lab script; failure costs 2 points and counts as a lab
    /// fail.
    LabScript,
    /// A challenge attempt; failure costs 1 point.
    Challenge,
    /// The check-output log itself; only its presence is required.
    CheckOutput,
    /// Any other deliverable; failure counts as a lab fail with no immediate
    /// deduction.
    Supporting,
}

impl RequirementKind {
    /// Classifies a logical name.
    pub fn of(name: &str) -> Self {
        if lab_script_re().is_match(name) {
            RequirementKind::LabScript
        } else if challenge_re().is_match(name) {
            RequirementKind::Challenge
        } else if name.contains("check-output") {
            RequirementKind::CheckOutput
        } else {
            RequirementKind::Supporting
        }
    }
}

/// How a local digest is compared against the self-reported log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashPolicy {
    /// Accept a local digest that appears under *any* name in the log. This
    /// mirrors the historical checker and will accept a file whose content
    /// matches a different file's logged hash.
    #[default]
    Permissive,
    /// Require the digest recorded under the file's own name to match.
    Strict,
}

impl HashPolicy {
    /// True iff `computed` satisfies this policy for `name` against the log.
    fn digest_ok(self, name: &str, computed: &str, hashes: &LogHashes) -> bool {
        match self {
            HashPolicy::Permissive => hashes.values().any(|logged| logged == computed),
            HashPolicy::Strict => hashes.get(name).is_some_and(|logged| logged == computed),
        }
    }
}

/// Which verification check a requirement failed, and why.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckFailure {
    /// No local copy of the required file was found.
    #[error("{name} not found")]
    MissingFile {
        /// Logical name of the requirement.
        name: String,
    },
    /// The log never recorded a result under this name.
    #[error("{name} failed check")]
    AbsentFromLog {
        /// Logical name of the requirement.
        name: String,
    },
    /// The local digest did not line up with the log.
    #[error("hash for {name} not valid (computed {computed})")]
    ChecksumMismatch {
        /// Logical name of the requirement.
        name:     String,
        /// Digest computed from the local copy, shown for comparison.
        computed: String,
    },
    /// The local copy could not be read.
    #[error("{name} could not be read: {reason}")]
    Unreadable {
        /// Logical name of the requirement.
        name:   String,
        /// Underlying read error.
        reason: String,
    },
}

/// Verification outcome for one required logical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementResult {
    /// Logical name of the requirement.
    pub name:    String,
    /// The requirement's kind.
    pub kind:    RequirementKind,
    /// Whether every check for this requirement passed.
    pub passed:  bool,
    /// The first check that failed, if any. `None` with `passed == false`
    /// means checks never ran (no log was found).
    pub failure: Option<CheckFailure>,
}

/// One student's graded summary: per-requirement results, the final score,
/// and diagnostic notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    /// Student identifier.
    pub student: String,
    /// Per-requirement outcomes, in assignment order.
    pub results: Vec<RequirementResult>,
    /// Final score, always within `0..=OUT_OF`.
    pub score:   u8,
    /// Diagnostic notes explaining every deduction.
    pub notes:   Vec<String>,
}

impl SubmissionRecord {
    /// Applies the tiered deduction policy and returns a fresh report.
    ///
    /// With no check-output log the score is 0 and no per-file checks run.
    /// Otherwise each requirement is checked by kind: lab scripts cost 2
    /// points per failure and count as a lab fail, challenges cost 1 point,
    /// supporting files count as a lab fail with no immediate deduction, and
    /// the check-output entry only warns. Two or more lab fails override the
    /// score to 0; exactly one overrides it to 3.
    pub fn grade(&self, policy: HashPolicy) -> ScoreReport {
        let mut results = Vec::with_capacity(self.requirements().len());
        let mut notes = Vec::new();

        let Some(log_text) = self.check_output() else {
            notes.push(NO_OUTPUT_NOTE.to_string());
            for name in self.requirements() {
                results.push(RequirementResult {
                    name:    name.clone(),
                    kind:    RequirementKind::of(name),
                    passed:  false,
                    failure: None,
                });
            }
            return ScoreReport {
                student: self.student().to_string(),
                results,
                score: 0,
                notes,
            };
        };

        let hashes = checksum::parse_log(log_text);
        let mut score = i32::from(OUT_OF);
        let mut lab_fails = 0u32;

        for name in self.requirements() {
            let kind = RequirementKind::of(name);
            let check = match kind {
                RequirementKind::LabScript => self.check_script(name, &hashes, policy, true),
                RequirementKind::Challenge => self.check_script(name, &hashes, policy, false),
                RequirementKind::CheckOutput | RequirementKind::Supporting => {
                    self.check_present(name)
                }
            };

            match check {
                Ok(()) => results.push(RequirementResult {
                    name:    name.clone(),
                    kind,
                    passed:  true,
                    failure: None,
                }),
                Err(failure) => {
                    match kind {
                        RequirementKind::LabScript => {
                            lab_fails += 1;
                            score -= 2;
                        }
                        RequirementKind::Challenge => score -= 1,
                        RequirementKind::CheckOutput => {
                            // Presence was implied by the log having been
                            // found; reaching this is an internal
                            // inconsistency, not a scoring failure.
                            warn!(
                                "check-output requirement `{name}` for {} failed its presence \
                                 check",
                                self.student()
                            );
                        }
                        RequirementKind::Supporting => lab_fails += 1,
                    }
                    notes.push(failure.to_string());
                    results.push(RequirementResult {
                        name:    name.clone(),
                        kind,
                        passed:  false,
                        failure: Some(failure),
                    });
                }
            }
        }

        if lab_fails > 1 {
            score = 0;
        } else if lab_fails == 1 {
            score = 3;
        }

        ScoreReport {
            student: self.student().to_string(),
            results,
            score: score.clamp(0, i32::from(OUT_OF)) as u8,
            notes,
        }
    }

    /// Sequential checks for a script requirement; the first failure
    /// short-circuits the rest. Lab scripts additionally require their name
    /// to appear as a key in the log.
    fn check_script(
        &self,
        name: &str,
        hashes: &LogHashes,
        policy: HashPolicy,
        require_log_entry: bool,
    ) -> Result<(), CheckFailure> {
        let path = self.path_for(name).ok_or_else(|| CheckFailure::MissingFile {
            name: name.to_string(),
        })?;

        if require_log_entry && !hashes.contains_key(name) {
            return Err(CheckFailure::AbsentFromLog {
                name: name.to_string(),
            });
        }

        let computed = checksum::checksum_file(path).map_err(|e| CheckFailure::Unreadable {
            name:   name.to_string(),
            reason: format!("{e:#}"),
        })?;

        if !policy.digest_ok(name, &computed, hashes) {
            return Err(CheckFailure::ChecksumMismatch {
                name: name.to_string(),
                computed,
            });
        }

        Ok(())
    }

    /// Presence-only check for supporting files and the check-output entry.
    fn check_present(&self, name: &str) -> Result<(), CheckFailure> {
        match self.path_for(name) {
            Some(_) => Ok(()),
            None => Err(CheckFailure::MissingFile {
                name: name.to_string(),
            }),
        }
    }
}
