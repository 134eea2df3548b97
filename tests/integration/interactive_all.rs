use crate::support::{set_readonly, Workspace};
use renamex::prompt::{AcceptDefaults, Answer, ScriptedPrompter};
use renamex::types::DuplicateStrategy;
use renamex::ApiError;

pub fn seed_tree(ws: &Workspace) {
    ws.write("b.jpg", "b");
    ws.write("a.jpg", "a");
    ws.write("sub1/x.png", "x");
    ws.write("sub1/y.png", "y");
    ws.write("sub2/z.txt", "z");
}

/// Root renamed to Trip10.., only the second subfolder chosen, renamed to Trip1.
pub fn root_and_second_subfolder() -> ScriptedPrompter {
    ScriptedPrompter::new([
        Answer::Yes,                   // set a new prefix?
        Answer::Text("Trip".into()),   // new prefix
        Answer::Yes,                   // change start number?
        Answer::Text("10".into()),     // start
        Answer::Yes,                   // rename these files?
        Answer::Yes,                   // descend into subfolders?
        Answer::Choice(1),             // select specific subfolders
        Answer::Text("2".into()),      // sub2
        Answer::Default,               // prefix for sub2, inherits Trip
        Answer::No,                    // keep start 1
        Answer::Yes,                   // rename these files?
    ])
}

#[test]
fn walks_root_then_selected_subfolder() {
    let ws = Workspace::new();
    seed_tree(&ws);
    let mut prompter = root_and_second_subfolder();

    let report = ws
        .executor(DuplicateStrategy::Skip)
        .run_all("File", 1, &mut prompter, "test")
        .unwrap();

    assert_eq!(prompter.remaining(), 0);
    assert_eq!(report.renamed, 3);
    assert_eq!(ws.names(""), vec!["Trip10.jpg", "Trip11.jpg"]);
    assert_eq!(ws.read("Trip10.jpg"), "a");
    assert_eq!(ws.names("sub1"), vec!["x.png", "y.png"]);
    assert_eq!(ws.names("sub2"), vec!["Trip1.txt"]);
    let scopes: Vec<&str> = report.folders.iter().map(|f| f.folder_scope.as_str()).collect();
    assert_eq!(scopes, vec![".", "sub2"]);
    assert!(prompter
        .messages()
        .iter()
        .any(|m| m.contains("Found 2 subfolder(s)") && m.contains("sub1 (2 files)")));
}

#[test]
fn defaults_descend_into_every_subfolder() {
    let ws = Workspace::new();
    seed_tree(&ws);
    ws.write("sub1/deeper/w.md", "w");

    let report = ws
        .executor(DuplicateStrategy::Skip)
        .run_all("Pic", 1, &mut AcceptDefaults::quiet(), "test")
        .unwrap();

    assert_eq!(report.renamed, 6);
    assert_eq!(ws.names(""), vec!["Pic1.jpg", "Pic2.jpg"]);
    assert_eq!(ws.names("sub1"), vec!["Pic1.png", "Pic2.png"]);
    assert_eq!(ws.names("sub1/deeper"), vec!["Pic1.md"]);
    assert_eq!(ws.names("sub2"), vec!["Pic1.txt"]);
}

#[test]
fn declining_descent_leaves_subfolders_alone() {
    let ws = Workspace::new();
    seed_tree(&ws);
    let mut prompter = ScriptedPrompter::new([
        Answer::No,  // keep prefix
        Answer::No,  // keep start
        Answer::Yes, // rename
        Answer::No,  // no subfolders
    ]);

    ws.executor(DuplicateStrategy::Skip)
        .run_all("File", 1, &mut prompter, "test")
        .unwrap();

    assert_eq!(ws.names(""), vec!["File1.jpg", "File2.jpg"]);
    assert_eq!(ws.names("sub1"), vec!["x.png", "y.png"]);
    assert_eq!(ws.names("sub2"), vec!["z.txt"]);
}

#[test]
fn invalid_subfolder_selection_skips_subfolders() {
    let ws = Workspace::new();
    seed_tree(&ws);
    let mut prompter = ScriptedPrompter::new([
        Answer::No,
        Answer::No,
        Answer::Yes,
        Answer::Yes,
        Answer::Choice(1),
        Answer::Text("one, two".into()),
    ]);

    ws.executor(DuplicateStrategy::Skip)
        .run_all("File", 1, &mut prompter, "test")
        .unwrap();

    assert_eq!(ws.names("sub1"), vec!["x.png", "y.png"]);
    assert!(prompter
        .messages()
        .iter()
        .any(|m| m.contains("Invalid selection")));
}

#[test]
fn readonly_subfolder_blocks_the_whole_pass() {
    let ws = Workspace::new();
    seed_tree(&ws);
    let locked = ws.path("sub2");
    set_readonly(&locked, true);

    let result = ws
        .executor(DuplicateStrategy::Skip)
        .run_all("File", 1, &mut AcceptDefaults::quiet(), "test");
    set_readonly(&locked, false);

    assert!(matches!(result, Err(ApiError::PermissionDenied(ref p)) if *p == locked));
    assert_eq!(ws.names(""), vec!["a.jpg", "b.jpg"]);
    assert_eq!(ws.names("sub1"), vec!["x.png", "y.png"]);
    assert!(!ws.state_dir().exists());
}
