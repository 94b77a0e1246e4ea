//! Tests for content digests and check-output log parsing.

use labmark::checksum::{checksum, parse_log};

#[test]
fn checksum_matches_known_vector() {
    assert_eq!(checksum("abc"), "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn checksum_is_deterministic_and_content_sensitive() {
    let text = "print('hello')\nprint('world')\n";
    let first = checksum(text);
    let second = checksum(text);
    assert_eq!(first, second);
    assert_eq!(first.len(), 32);
    assert!(first.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));

    let tweaked = "print('hello')\nprint('World')\n";
    assert_ne!(first, checksum(tweaked), "a single character changes the digest");
}

#[test]
fn parse_log_collects_token_pairs() {
    let text = "lab6a.py 28a91ca5840d32645504b88395ff4a54\nsome prose\nlab6b.py \
                deadbeefdeadbeefdeadbeefdeadbeef";
    let hashes = parse_log(text);
    assert_eq!(hashes.len(), 2);
    assert_eq!(
        hashes.get("lab6a.py").map(String::as_str),
        Some("28a91ca5840d32645504b88395ff4a54")
    );
    assert_eq!(
        hashes.get("lab6b.py").map(String::as_str),
        Some("deadbeefdeadbeefdeadbeefdeadbeef")
    );
}

#[test]
fn parse_log_excludes_malformed_tokens() {
    // Too short, too long, uppercase hex, missing extension.
    let text = "lab6a.py 28a91ca5840d32645504b88395ff4a5\n\
                lab6b.py deadbeefdeadbeefdeadbeefdeadbeefa\n\
                lab6c.py 28A91CA5840D32645504B88395FF4A54\n\
                lab6d 28a91ca5840d32645504b88395ff4a54\n";
    assert!(parse_log(text).is_empty());
}

#[test]
fn parse_log_later_duplicate_wins() {
    let text = "lab6a.py 28a91ca5840d32645504b88395ff4a54\n\
                lab6a.py deadbeefdeadbeefdeadbeefdeadbeef\n";
    let hashes = parse_log(text);
    assert_eq!(hashes.len(), 1);
    assert_eq!(
        hashes.get("lab6a.py").map(String::as_str),
        Some("deadbeefdeadbeefdeadbeefdeadbeef")
    );
}

#[test]
fn parse_log_of_prose_is_empty() {
    assert!(parse_log("no hashes here, only feedback text").is_empty());
    assert!(parse_log("").is_empty());
}
