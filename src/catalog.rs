#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The deliverable catalog: which files each known assignment requires.

use std::{collections::HashSet, sync::OnceLock};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Embedded deliverable table. Adding an assignment is a data-only change.
const DELIVERABLES_JSON: &str = include_str!("data/deliverables.json");

/// Requirements for a single assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentSpec {
    /// Assignment identifier as it appears in submission file names, eg.
    /// `Lab 6`.
    pub identifier:     String,
    /// Ordered list of required logical file names.
    pub required:       Vec<String>,
    /// Expected digest of this assignment's check-output format, where one has
    /// been recorded. Validates the catalog data itself, not submissions.
    #[serde(default)]
    pub reference_hash: Option<String>,
}

/// The full table of known assignments.
#[derive(Debug)]
pub struct Catalog {
    /// Assignment specs in catalog order.
    entries: Vec<AssignmentSpec>,
}

/// Parsed and validated catalog, shared for the life of the process.
static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// Returns the embedded catalog, parsing and validating it on first use.
    pub fn builtin() -> Result<&'static Catalog> {
        if let Some(catalog) = CATALOG.get() {
            return Ok(catalog);
        }

        let entries: Vec<AssignmentSpec> = serde_json::from_str(DELIVERABLES_JSON)
            .context("Could not parse the embedded deliverable table")?;
        let catalog = Catalog { entries };
        catalog.validate()?;

        Ok(CATALOG.get_or_init(|| catalog))
    }

    /// Checks every entry for a non-empty, duplicate-free requirement list and
    /// a well-formed reference hash.
    fn validate(&self) -> Result<()> {
        for spec in &self.entries {
            ensure!(
                !spec.required.is_empty(),
                "Catalog entry `{}` has no required files",
                spec.identifier
            );

            let distinct: HashSet<&str> = spec.required.iter().map(String::as_str).collect();
            ensure!(
                distinct.len() == spec.required.len(),
                "Catalog entry `{}` lists a required file twice",
                spec.identifier
            );

            if let Some(hash) = &spec.reference_hash {
                ensure!(
                    hash.len() == 32 && hash.bytes().all(|b| b.is_ascii_hexdigit()),
                    "Catalog entry `{}` has a malformed reference hash `{}`",
                    spec.identifier,
                    hash
                );
                ensure!(
                    !hash.bytes().any(|b| b.is_ascii_uppercase()),
                    "Catalog entry `{}` has a reference hash with uppercase hex `{}`",
                    spec.identifier,
                    hash
                );
            }
        }

        Ok(())
    }

    /// Looks up an assignment by exact identifier. `None` means the task is
    /// unknown, which callers treat as fatal for the whole run.
    pub fn assignment(&self, task: &str) -> Option<&AssignmentSpec> {
        self.entries.iter().find(|spec| spec.identifier == task)
    }

    /// All known assignments, in catalog order.
    pub fn entries(&self) -> &[AssignmentSpec] {
        &self.entries
    }
}
