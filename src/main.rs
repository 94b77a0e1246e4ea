#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # labmark
//!
//! Command-line entry point. Download an assignment batch from the LMS,
//! extract it, and run `labmark grade` against the directory (or individual
//! files). `labmark catalog` lists the assignments the tool knows about.

use std::path::PathBuf;

use anyhow::Result;
use bpaf::*;
use labmark::{catalog::Catalog, grade::HashPolicy, grader::GradingRun, report, util};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade a batch of submissions
    Grade {
        /// Require keyed digest matches instead of the permissive any-value
        /// match
        strict: bool,
        /// Submission files or directories
        paths:  Vec<PathBuf>,
    },
    /// List known assignments
    Catalog,
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses submission paths
    fn paths() -> impl Parser<Vec<PathBuf>> {
        positional::<PathBuf>("PATH")
            .help("Submission files or directories (default: current directory)")
            .many()
    }

    /// parses the strict digest switch
    fn strict() -> impl Parser<bool> {
        long("strict")
            .help("Require each digest to match the hash logged under the file's own name")
            .switch()
    }

    let grade = construct!(Cmd::Grade {
        strict(),
        paths(),
    })
    .to_options()
    .command("grade")
    .help("Grade a batch of downloaded submissions");

    let catalog = pure(Cmd::Catalog)
        .to_options()
        .command("catalog")
        .help("List known assignments and their deliverables");

    let cmd = construct!([grade, catalog]);

    cmd.to_options()
        .descr("Batch autograder for LMS lab downloads")
        .run()
}

fn main() -> Result<()> {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match options() {
        Cmd::Grade { strict, paths } => {
            let policy = if strict {
                HashPolicy::Strict
            } else {
                HashPolicy::Permissive
            };

            let files = util::collect_inputs(&paths)?;
            let run = GradingRun::execute(&files, policy)?;

            for summary in run.reports() {
                println!("{}", report::render_summary(&summary));
                println!();
            }
            println!("{}", report::render_flagged(run.flagged()));
        }
        Cmd::Catalog => {
            let catalog = Catalog::builtin()?;
            println!("{}", report::render_catalog(catalog));
        }
    }

    Ok(())
}
