use crate::support::Workspace;
use renamex::naming::{GapRun, RangeSpec};
use renamex::prompt::{AcceptDefaults, Answer, ScriptedPrompter};
use renamex::rollback::RollbackOutcome;
use renamex::types::DuplicateStrategy;
use renamex::ApiError;

#[test]
fn shift_up_and_roll_back_restores_names_and_content() {
    let ws = Workspace::new();
    for n in 1..=5 {
        ws.write(&format!("IMG{}.jpg", n), &format!("photo {}", n));
    }

    let report = ws
        .executor(DuplicateStrategy::Ask)
        .run_range(&RangeSpec::new(1, 5, 10, "IMG"), &mut AcceptDefaults::quiet(), "test")
        .unwrap();
    assert_eq!(report.renamed, 5);
    assert!(report.failed.is_empty());
    assert_eq!(
        ws.names(""),
        vec!["IMG10.jpg", "IMG11.jpg", "IMG12.jpg", "IMG13.jpg", "IMG14.jpg"]
    );
    assert_eq!(ws.read("IMG12.jpg"), "photo 3");

    let outcome = ws
        .rollback_engine()
        .rollback(&mut AcceptDefaults::quiet())
        .unwrap();
    assert!(matches!(outcome, RollbackOutcome::Completed(ref r) if r.reverted == 5));
    assert_eq!(
        ws.names(""),
        vec!["IMG1.jpg", "IMG2.jpg", "IMG3.jpg", "IMG4.jpg", "IMG5.jpg"]
    );
    assert_eq!(ws.read("IMG3.jpg"), "photo 3");
    assert!(!ws.state_dir().exists());
}

#[test]
fn overlapping_shift_up_by_one_needs_no_staging() {
    let ws = Workspace::new();
    for n in 1..=3 {
        ws.write(&format!("IMG{}.png", n), &n.to_string());
    }
    let report = ws
        .executor(DuplicateStrategy::Skip)
        .run_range(&RangeSpec::new(1, 3, 2, "IMG"), &mut AcceptDefaults::quiet(), "test")
        .unwrap();

    assert_eq!(report.renamed, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(ws.names(""), vec!["IMG2.png", "IMG3.png", "IMG4.png"]);
    assert_eq!(ws.read("IMG4.png"), "3");
}

#[test]
fn gaps_are_reported_and_remaining_files_renamed() {
    let ws = Workspace::new();
    for n in [1, 2, 5, 8] {
        ws.write(&format!("File{}.txt", n), "x");
    }
    let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::Yes]);
    let report = ws
        .executor(DuplicateStrategy::Skip)
        .run_range(&RangeSpec::new(1, 8, 21, "File"), &mut prompter, "test")
        .unwrap();

    assert_eq!(
        report.gaps[0].runs,
        vec![GapRun::new(3, 4), GapRun::new(6, 7)]
    );
    assert_eq!(report.renamed, 4);
    assert_eq!(
        ws.names(""),
        vec!["File21.txt", "File22.txt", "File25.txt", "File28.txt"]
    );
    assert!(prompter
        .messages()
        .iter()
        .any(|m| m.contains("File3, File4, File6, File7")));
}

#[test]
fn files_outside_the_window_or_prefix_are_untouched() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "1");
    ws.write("IMG9.jpg", "9");
    ws.write("IMGX.jpg", "x");
    ws.write("DSC1.jpg", "d");
    ws.write(".IMG2.jpg", "hidden");

    ws.executor(DuplicateStrategy::Skip)
        .run_range(&RangeSpec::new(1, 2, 100, "IMG"), &mut AcceptDefaults::quiet(), "test")
        .unwrap();

    assert_eq!(ws.names(""), vec!["DSC1.jpg", "IMG100.jpg", "IMG9.jpg", "IMGX.jpg"]);
    assert!(ws.path(".IMG2.jpg").exists());
}

#[test]
fn new_prefix_keeps_multi_part_extension() {
    let ws = Workspace::new();
    ws.write("scan1.tar.gz", "a");
    ws.write("scan2.tar.gz", "b");
    ws.executor(DuplicateStrategy::Skip)
        .run_range(
            &RangeSpec::new(1, 2, 1, "scan").with_new_prefix("archive"),
            &mut AcceptDefaults::quiet(),
            "test",
        )
        .unwrap();
    assert_eq!(ws.names(""), vec!["archive1.tar.gz", "archive2.tar.gz"]);
}

#[test]
fn ambiguous_numbers_abort_before_any_rename() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    ws.write("IMG01.png", "b");
    ws.write("IMG2.jpg", "c");
    let result = ws.executor(DuplicateStrategy::Skip).run_range(
        &RangeSpec::new(1, 2, 5, "IMG"),
        &mut AcceptDefaults::quiet(),
        "test",
    );

    assert!(matches!(result, Err(ApiError::AmbiguousSource { number: 1, .. })));
    assert_eq!(ws.names(""), vec!["IMG01.png", "IMG1.jpg", "IMG2.jpg"]);
    assert!(!ws.state_dir().exists());
}

#[test]
fn reversed_range_is_invalid() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    let result = ws.executor(DuplicateStrategy::Skip).run_range(
        &RangeSpec::new(5, 1, 1, "IMG"),
        &mut AcceptDefaults::quiet(),
        "test",
    );
    assert!(matches!(result, Err(ApiError::InvalidRange(_))));
}

#[test]
fn readonly_root_is_rejected_before_renaming() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    crate::support::set_readonly(ws.root(), true);
    let result = ws.executor(DuplicateStrategy::Skip).run_range(
        &RangeSpec::new(1, 1, 2, "IMG"),
        &mut AcceptDefaults::quiet(),
        "test",
    );
    crate::support::set_readonly(ws.root(), false);

    assert!(matches!(result, Err(ApiError::PermissionDenied(_))));
    assert_eq!(ws.names(""), vec!["IMG1.jpg"]);
}
