//! End-to-end tests over a synthetic downloaded batch.

use std::path::PathBuf;

use labmark::{
    grade::HashPolicy,
    grader::{GradingRun, RunError},
    util,
};

fn batch_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("lab6-batch")
}

fn batch_run() -> GradingRun {
    let files = util::collect_inputs(&[batch_root()]).expect("collect batch files");
    GradingRun::execute(&files, HashPolicy::Permissive).expect("run grading")
}

#[test]
fn detects_task_from_first_file() {
    assert_eq!(batch_run().task(), "Lab 6");
}

#[test]
fn scores_every_student_in_order() {
    let run = batch_run();
    let reports = run.reports();

    let students: Vec<&str> = reports.iter().map(|r| r.student.as_str()).collect();
    assert_eq!(students, vec!["agarcia", "bchen", "dpatel", "efoster", "jsmith"]);

    let score_of = |student: &str| {
        reports
            .iter()
            .find(|r| r.student == student)
            .map(|r| r.score)
            .expect("student graded")
    };
    assert_eq!(score_of("agarcia"), 5, "complete, verified submission");
    assert_eq!(score_of("bchen"), 0, "no check-output log");
    assert_eq!(score_of("dpatel"), 3, "one lab script missing");
    assert_eq!(score_of("efoster"), 4, "challenge missing");
    assert_eq!(score_of("jsmith"), 0, "two lab scripts missing");
}

#[test]
fn unmatched_and_foreign_files_are_flagged() {
    let run = batch_run();

    let flagged: Vec<String> = run
        .flagged()
        .iter()
        .map(|p| p.file_name().expect("file name").to_string_lossy().into_owned())
        .collect();
    assert_eq!(flagged.len(), 2);
    assert!(
        flagged
            .iter()
            .any(|name| name == "Lab 6_agarcia_attempt_2024-10-02-11-22-33_notes.docx")
    );
    assert!(
        flagged
            .iter()
            .any(|name| name == "Lab 7_kwong_attempt_2024-10-03-09-15-00_lab7a.py")
    );
}

#[test]
fn flagged_files_are_never_attributed_to_records() {
    let run = batch_run();

    for record in run.records() {
        for requirement in record.requirements() {
            if let Some(path) = record.path_for(requirement) {
                assert!(
                    !run.flagged().contains(&path.to_path_buf()),
                    "{} held a flagged path {}",
                    record.student(),
                    path.display()
                );
            }
        }
    }
}

#[test]
fn attempt_receipts_are_skipped_entirely() {
    let run = batch_run();

    let receipt = "Lab 6_bchen_attempt_2024-10-02-12-00-00.txt";
    assert!(
        !run.flagged()
            .iter()
            .any(|p| p.to_string_lossy().contains(receipt)),
        "receipts are administrative, not flagged"
    );
    let bchen = run.record("bchen").expect("bchen graded");
    for requirement in bchen.requirements() {
        if let Some(path) = bchen.path_for(requirement) {
            assert!(!path.to_string_lossy().contains(receipt));
        }
    }
}

#[test]
fn empty_input_set_is_fatal() {
    let err = GradingRun::execute(&[], HashPolicy::Permissive).expect_err("no files");
    assert!(matches!(
        err.downcast_ref::<RunError>(),
        Some(RunError::NoInputFiles)
    ));
}

#[test]
fn unknown_assignment_is_fatal() {
    let files = vec![PathBuf::from(
        "Quiz 1_jdoe_attempt_2024-10-01-01-01-01_quiz.py",
    )];
    let err = GradingRun::execute(&files, HashPolicy::Permissive).expect_err("unknown task");
    match err.downcast_ref::<RunError>() {
        Some(RunError::UnknownAssignment(task)) => assert_eq!(task, "Quiz 1"),
        other => panic!("expected UnknownAssignment, got {other:?}"),
    }
}

#[test]
fn undelimited_first_file_is_fatal() {
    let files = vec![PathBuf::from("README.md")];
    let err = GradingRun::execute(&files, HashPolicy::Permissive).expect_err("unparseable name");
    match err.downcast_ref::<RunError>() {
        Some(RunError::UnknownAssignment(name)) => assert_eq!(name, "README.md"),
        other => panic!("expected UnknownAssignment, got {other:?}"),
    }
}
