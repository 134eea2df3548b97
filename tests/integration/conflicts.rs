use crate::support::Workspace;
use renamex::naming::RangeSpec;
use renamex::prompt::{AcceptDefaults, Answer, ScriptedPrompter};
use renamex::record::{RecordStore, TomlRecordStore};
use renamex::rollback::RollbackOutcome;
use renamex::types::{ActionKind, DuplicateStrategy};
use std::fs;

fn dsc_to_photo() -> RangeSpec {
    RangeSpec::new(3, 3, 3, "DSC").with_new_prefix("Photo")
}

#[test]
fn overwrite_then_rollback_restores_both_files() {
    let ws = Workspace::new();
    ws.write("DSC3.jpg", "fresh shot");
    ws.write("Photo3.jpg", "older shot");

    let report = ws
        .executor(DuplicateStrategy::Overwrite)
        .run_range(&dsc_to_photo(), &mut AcceptDefaults::quiet(), "test")
        .unwrap();
    assert_eq!(report.renamed, 1);
    assert_eq!(ws.names(""), vec!["Photo3.jpg"]);
    assert_eq!(ws.read("Photo3.jpg"), "fresh shot");

    let record = TomlRecordStore::new(ws.path(".renamex/operations.toml"))
        .load()
        .unwrap()
        .unwrap();
    let entry = &record.entries[0];
    assert_eq!(entry.action_kind, ActionKind::Overwrite);
    let backup = entry.backup_path.clone().unwrap();
    assert!(backup.starts_with(ws.path(".renamex/backups/.overwritten")));

    let outcome = ws
        .rollback_engine()
        .rollback(&mut AcceptDefaults::quiet())
        .unwrap();
    assert!(matches!(outcome, RollbackOutcome::Completed(_)));
    assert_eq!(ws.read("DSC3.jpg"), "fresh shot");
    assert_eq!(ws.read("Photo3.jpg"), "older shot");
    assert!(!ws.state_dir().exists());
}

#[test]
fn backup_keeps_displaced_copy_visible_until_rollback() {
    let ws = Workspace::new();
    ws.write("DSC3.jpg", "new");
    ws.write("Photo3.jpg", "old");

    ws.executor(DuplicateStrategy::Backup)
        .run_range(&dsc_to_photo(), &mut AcceptDefaults::quiet(), "test")
        .unwrap();
    let backups: Vec<_> = fs::read_dir(ws.path(".renamex/backups"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("Photo3.jpg.") && backups[0].ends_with(".backup"));

    ws.rollback_engine()
        .rollback(&mut AcceptDefaults::quiet())
        .unwrap();
    assert_eq!(ws.names(""), vec!["DSC3.jpg", "Photo3.jpg"]);
    assert_eq!(ws.read("Photo3.jpg"), "old");
    assert!(!ws.state_dir().exists());
}

#[test]
fn suffix_strategy_picks_free_names() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    ws.write("IMG2.jpg", "b");
    ws.write("Trip1.jpg", "taken");
    ws.write("Trip1_1.jpg", "taken too");

    let report = ws
        .executor(DuplicateStrategy::Suffix)
        .run_range(
            &RangeSpec::new(1, 2, 1, "IMG").with_new_prefix("Trip"),
            &mut AcceptDefaults::quiet(),
            "test",
        )
        .unwrap();

    assert_eq!(report.renamed, 2);
    assert_eq!(ws.read("Trip1_2.jpg"), "a");
    assert_eq!(ws.read("Trip2.jpg"), "b");

    ws.rollback_engine()
        .rollback(&mut AcceptDefaults::quiet())
        .unwrap();
    assert_eq!(
        ws.names(""),
        vec!["IMG1.jpg", "IMG2.jpg", "Trip1.jpg", "Trip1_1.jpg"]
    );
}

#[test]
fn ask_strategy_applies_each_answer() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    ws.write("IMG2.jpg", "b");
    ws.write("New1.jpg", "x");
    ws.write("New2.jpg", "y");

    // proceed, then: skip IMG1, overwrite for IMG2
    let mut prompter = ScriptedPrompter::new([Answer::Yes, Answer::Choice(0), Answer::Choice(3)]);
    let report = ws
        .executor(DuplicateStrategy::Ask)
        .run_range(
            &RangeSpec::new(1, 2, 1, "IMG").with_new_prefix("New"),
            &mut prompter,
            "test",
        )
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.renamed, 1);
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(ws.names(""), vec!["IMG1.jpg", "New1.jpg", "New2.jpg"]);
    assert_eq!(ws.read("New2.jpg"), "b");
}

#[test]
fn accepting_defaults_skips_conflicts() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "a");
    ws.write("New1.jpg", "x");

    let report = ws
        .executor(DuplicateStrategy::Ask)
        .run_range(
            &RangeSpec::new(1, 1, 1, "IMG").with_new_prefix("New"),
            &mut AcceptDefaults::quiet(),
            "test",
        )
        .unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(ws.read("New1.jpg"), "x");
    assert_eq!(report.record_path, None);
    assert!(!ws.path(".renamex").exists());

    // nothing to undo, so the next pass is not blocked
    let next = ws
        .executor(DuplicateStrategy::Skip)
        .run_range(
            &RangeSpec::new(1, 1, 2, "IMG"),
            &mut AcceptDefaults::quiet(),
            "test",
        )
        .unwrap();
    assert_eq!(next.renamed, 1);
    assert!(ws.path("IMG2.jpg").exists());
}
