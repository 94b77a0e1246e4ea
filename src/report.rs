#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Terminal rendering for per-student summaries, the flagged-file footer, and
//! the catalog listing. No decision logic lives here.

use std::path::PathBuf;

use colored::Colorize;
use itertools::Itertools;
use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

use crate::{
    catalog::Catalog,
    grade::{self, ScoreReport},
};

/// One row of the per-student requirement table.
#[derive(Tabled)]
struct RequirementRow {
    /// Logical requirement name.
    #[tabled(rename = "Requirement")]
    requirement: String,
    /// Pass/fail mark.
    #[tabled(rename = "Status")]
    status:      String,
}

/// One row of the catalog listing.
#[derive(Tabled)]
struct CatalogRow {
    /// Assignment identifier.
    #[tabled(rename = "Assignment")]
    assignment:   String,
    /// Comma-separated deliverable names.
    #[tabled(rename = "Deliverables")]
    deliverables: String,
    /// Reference hash, where recorded.
    #[tabled(rename = "Reference hash")]
    reference:    String,
}

/// Renders one student's summary: header, requirement table, score, and any
/// notes.
pub fn render_summary(report: &ScoreReport) -> String {
    let rows: Vec<RequirementRow> = report
        .results
        .iter()
        .map(|result| {
            if result.passed {
                RequirementRow {
                    requirement: result.name.clone(),
                    status:      "[✅]".to_string(),
                }
            } else {
                RequirementRow {
                    requirement: result.name.red().to_string(),
                    status:      "[❌]".red().to_string(),
                }
            }
        })
        .collect();

    let table = Table::new(&rows)
        .with(Panel::header(report.student.blue().to_string()))
        .with(Panel::footer(format!("Score: {}/{}", report.score, grade::OUT_OF)))
        .with(Style::modern())
        .to_string();

    if report.notes.is_empty() {
        table
    } else {
        format!("{table}\n{}", report.notes.iter().join("\n"))
    }
}

/// Renders the end-of-run footer: count and listing of flagged files.
pub fn render_flagged(flagged: &[PathBuf]) -> String {
    if flagged.is_empty() {
        return "Flagged files: 0".to_string();
    }

    let listing = flagged
        .iter()
        .map(|path| format!("  {}", path.display().to_string().red()))
        .join("\n");
    format!("Flagged files: {}\n{listing}", flagged.len())
}

/// Renders the table of known assignments.
pub fn render_catalog(catalog: &Catalog) -> String {
    let rows: Vec<CatalogRow> = catalog
        .entries()
        .iter()
        .map(|spec| CatalogRow {
            assignment:   spec.identifier.clone(),
            deliverables: spec.required.iter().join(", "),
            reference:    spec.reference_hash.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(&rows).with(Style::modern()).to_string()
}
