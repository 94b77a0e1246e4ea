#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! File collection helpers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Recursively collects every file under `root`, sorted so task detection and
/// duplicate-overwrite outcomes are reproducible across runs.
pub fn files_under(root: &Path) -> Result<Vec<PathBuf>> {
    let mut pattern = root.to_path_buf();
    pattern.push("**");
    pattern.push("*");

    let pattern = pattern
        .to_str()
        .context("Could not convert root to string")?
        .to_string();

    let mut files: Vec<PathBuf> = glob(&pattern)
        .context("Could not create glob")?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    Ok(files)
}

/// Expands mixed file-and-directory arguments into a flat, sorted file list.
/// No arguments means the current directory.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return files_under(Path::new("."));
    }

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.append(&mut files_under(path)?);
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();

    Ok(files)
}
