//! Tests for submission file-name classification.

use std::path::Path;

use labmark::classify::{classify, is_attempt_summary, is_check_output_log};

#[test]
fn classify_splits_structured_name() {
    let path = Path::new("batch/Lab 6_jdoe_attempt_2024-10-02-11-22-33_lab6a.py");
    let classified = classify(path).expect("structured name parses");
    assert_eq!(classified.task, "Lab 6");
    assert_eq!(classified.student, "jdoe");
    assert_eq!(classified.logical_name, "lab6a.py");
}

#[test]
fn classify_reattaches_extension_to_last_field() {
    let path = Path::new("Lab 6_jdoe_attempt_2024-10-02-11-22-33_lab6-check-output.txt");
    let classified = classify(path).expect("structured name parses");
    assert_eq!(classified.logical_name, "lab6-check-output.txt");
}

#[test]
fn classify_handles_missing_extension() {
    let path = Path::new("Lab 6_jdoe_attempt_notes");
    let classified = classify(path).expect("structured name parses");
    assert_eq!(classified.logical_name, "notes");
}

#[test]
fn classify_rejects_undelimited_name() {
    let err = classify(Path::new("somewhere/lab6a.py")).expect_err("single field");
    assert_eq!(err.0, "lab6a.py", "error carries the bare file name");
}

#[test]
fn check_output_detection_is_suffix_and_case_sensitive() {
    assert!(is_check_output_log(Path::new(
        "Lab 6_jdoe_attempt_2024-10-02-11-22-33_lab6-check-output.txt"
    )));
    assert!(is_check_output_log(Path::new("lab6-check-output.txt")));
    assert!(!is_check_output_log(Path::new("lab6-Check-Output.txt")));
    assert!(!is_check_output_log(Path::new("lab6-check-output.txt.bak")));
    assert!(!is_check_output_log(Path::new("output.txt")));
}

#[test]
fn attempt_receipts_are_recognised() {
    assert!(is_attempt_summary(Path::new(
        "Lab 6_jdoe_attempt_2024-10-02-11-22-33.txt"
    )));
    assert!(!is_attempt_summary(Path::new(
        "Lab 6_jdoe_attempt_2024-10-02-11-22-33_lab6a.py"
    )));
    assert!(!is_attempt_summary(Path::new(
        "Lab 6_jdoe_attempt_2024-10-02-11-22-33_lab6-check-output.txt"
    )));
}
