#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Content digests and check-output log parsing.

use std::{collections::BTreeMap, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use regex::Regex;

/// Self-reported hashes keyed by logical file name, parsed out of one
/// student's check-output log.
pub type LogHashes = BTreeMap<String, String>;

/// Token shape of a self-reported hash pair: `<name>.<2-3 char ext> <32 hex>`.
/// The trailing boundary keeps over-length digests from matching.
fn log_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+\.\w{2,3}) ([0-9a-f]{32})\b").expect("valid regex"))
}

/// MD5 digest of `text`, rendered as 32 lowercase hex characters.
///
/// The digest is over the bytes exactly as read; CRLF and LF copies of the
/// same content hash differently.
pub fn checksum(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// Reads `path` in full and returns the digest of its contents.
pub fn checksum_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(checksum(&text))
}

/// Scans a check-output log for `<name>.<ext> <digest>` pairs.
///
/// Surrounding prose is ignored, a later duplicate name overwrites an earlier
/// one, and zero matches yield an empty map.
pub fn parse_log(text: &str) -> LogHashes {
    log_token_re()
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}
