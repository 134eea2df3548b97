use crate::interactive_all::{root_and_second_subfolder, seed_tree};
use crate::support::Workspace;
use renamex::naming::RangeSpec;
use renamex::prompt::{AcceptDefaults, Answer, ScriptedPrompter};
use renamex::rollback::{CommitOutcome, RollbackOutcome};
use renamex::types::DuplicateStrategy;
use std::fs;

#[test]
fn selected_folder_rolls_back_alone() {
    let ws = Workspace::new();
    seed_tree(&ws);
    ws.executor(DuplicateStrategy::Skip)
        .run_all("File", 1, &mut root_and_second_subfolder(), "test")
        .unwrap();

    let engine = ws.rollback_engine();
    let mut prompter = ScriptedPrompter::new([
        Answer::Yes,
        Answer::Choice(1),
        Answer::Text("2".into()),
    ]);
    let outcome = engine.rollback(&mut prompter).unwrap();
    let report = match outcome {
        RollbackOutcome::Completed(report) => report,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(report.folders, vec!["sub2".to_string()]);
    assert_eq!(report.reverted, 1);
    assert_eq!(report.remaining_entries, 2);
    assert!(!report.record_removed);
    assert_eq!(ws.names("sub2"), vec!["z.txt"]);
    assert_eq!(ws.names(""), vec!["Trip10.jpg", "Trip11.jpg"]);

    // Only the root is left, so no folder question this time.
    let mut prompter = ScriptedPrompter::new([Answer::Yes]);
    let outcome = engine.rollback(&mut prompter).unwrap();
    assert!(matches!(outcome, RollbackOutcome::Completed(ref r) if r.record_removed));
    assert_eq!(ws.names(""), vec!["a.jpg", "b.jpg"]);
    assert!(!ws.state_dir().exists());
}

#[test]
fn missing_renamed_file_is_reported_and_kept() {
    let ws = Workspace::new();
    for n in 1..=3 {
        ws.write(&format!("IMG{}.jpg", n), &n.to_string());
    }
    ws.executor(DuplicateStrategy::Skip)
        .run_range(&RangeSpec::new(1, 3, 7, "IMG"), &mut AcceptDefaults::quiet(), "test")
        .unwrap();
    fs::remove_file(ws.path("IMG8.jpg")).unwrap();

    let outcome = ws
        .rollback_engine()
        .rollback(&mut AcceptDefaults::quiet())
        .unwrap();
    let report = match outcome {
        RollbackOutcome::Partial(report) => report,
        other => panic!("expected partial rollback, got {:?}", other),
    };
    assert_eq!(report.reverted, 2);
    assert_eq!(report.unrestored.len(), 1);
    assert_eq!(report.unrestored[0].path, ws.path("IMG8.jpg"));
    assert_eq!(ws.names(""), vec!["IMG1.jpg", "IMG3.jpg"]);
    assert!(ws.path(".renamex/operations.toml").exists());
}

#[test]
fn rollback_without_record_is_informational() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "1");
    let outcome = ws
        .rollback_engine()
        .rollback(&mut ScriptedPrompter::new([]))
        .unwrap();
    assert_eq!(outcome, RollbackOutcome::NoRollbackAvailable);
}

#[test]
fn commit_keeps_visible_backups_and_unblocks_next_pass() {
    let ws = Workspace::new();
    ws.write("A1.txt", "a");
    ws.write("B1.txt", "b");
    ws.executor(DuplicateStrategy::Backup)
        .run_range(
            &RangeSpec::new(1, 1, 1, "A").with_new_prefix("B"),
            &mut AcceptDefaults::quiet(),
            "test",
        )
        .unwrap();

    let outcome = ws.rollback_engine().commit().unwrap();
    match outcome {
        CommitOutcome::Committed {
            entries,
            removed_hidden_backups,
            kept_backups_dir,
        } => {
            assert_eq!(entries, 1);
            assert_eq!(removed_hidden_backups, 0);
            assert_eq!(kept_backups_dir, Some(ws.path(".renamex/backups")));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(!ws.path(".renamex/operations.toml").exists());
    assert_eq!(fs::read_dir(ws.path(".renamex/backups")).unwrap().count(), 1);

    let next = ws
        .executor(DuplicateStrategy::Skip)
        .run_range(&RangeSpec::new(1, 1, 2, "B"), &mut AcceptDefaults::quiet(), "test")
        .unwrap();
    assert_eq!(next.renamed, 1);
    assert_eq!(ws.read("B2.txt"), "a");
}
