use crate::support::Workspace;
use clap::{CommandFactory, Parser};
use renamex::config::RenamexConfig;
use renamex::prompt::{AcceptDefaults, Answer, ScriptedPrompter};
use renamex::tooling::cli::{Cli, CliContext, OutputFormat};
use renamex::types::DuplicateStrategy;
use renamex::ApiError;

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("renamex").chain(args.iter().copied())).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["renamex", "-a"],
        vec!["renamex", "--all", "-l", "/tmp", "-p", "IMG", "--new-start", "5"],
        vec!["renamex", "-r", "--location", "/tmp"],
        vec!["renamex", "--commit"],
        vec![
            "renamex",
            "--current-start",
            "1",
            "--current-end",
            "5",
            "--new-start",
            "10",
            "-d",
            "suffix",
        ],
        vec!["renamex", "-r", "--format", "json", "--log-level", "debug", "--log-output", "stderr"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_conflicting_or_missing_actions() {
    let invalid: Vec<Vec<&str>> = vec![
        vec!["renamex"],
        vec!["renamex", "-l", "/tmp"],
        vec!["renamex", "-a", "-r"],
        vec!["renamex", "--rollback", "--commit"],
        vec!["renamex", "-a", "--current-start", "1"],
        vec!["renamex", "-r", "--format", "yaml"],
        vec!["renamex", "--current-start", "-1"],
    ];
    for args in invalid {
        assert!(
            Cli::try_parse_from(args.clone()).is_err(),
            "expected parse failure for args: {args:?}"
        );
    }
}

#[test]
fn help_lists_every_flag() {
    let help = Cli::command().render_long_help().to_string();
    for flag in [
        "--location",
        "--prefix",
        "--new-prefix",
        "--all",
        "--current-start",
        "--current-end",
        "--new-start",
        "--rollback",
        "--commit",
        "--duplicate-strategy",
        "--yes",
        "--format",
    ] {
        assert!(help.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn execute_range_then_rollback_through_context() {
    let ws = Workspace::new();
    for n in 1..=2 {
        ws.write(&format!("IMG{}.jpg", n), "x");
    }
    let root = ws.root().to_string_lossy().into_owned();

    let rename = cli(&[
        "-l", &root, "-p", "IMG", "--current-start", "1", "--current-end", "2", "--new-start",
        "10",
    ]);
    let mut context = CliContext::with_prompter(
        RenamexConfig::default(),
        Box::new(AcceptDefaults::quiet()),
        OutputFormat::Text,
    );
    let output = context.execute(&rename).unwrap();
    assert!(output.contains("Rename Summary"));
    assert!(output.contains("--rollback"));
    assert_eq!(ws.names(""), vec!["IMG10.jpg", "IMG11.jpg"]);

    let mut json_context = CliContext::with_prompter(
        RenamexConfig::default(),
        Box::new(AcceptDefaults::quiet()),
        OutputFormat::Json,
    );
    let output = json_context.execute(&cli(&["-r", "-l", &root])).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["outcome"], "completed");
    assert_eq!(value["reverted"], 2);
    assert_eq!(ws.names(""), vec!["IMG1.jpg", "IMG2.jpg"]);
}

#[test]
fn missing_location_is_prompted_for() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "x");
    let root = ws.root().to_string_lossy().into_owned();

    let mut context = CliContext::with_prompter(
        RenamexConfig::default(),
        Box::new(ScriptedPrompter::new([Answer::Text(root)])),
        OutputFormat::Json,
    );
    let output = context.execute(&cli(&["--commit"])).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["outcome"], "nothing_to_commit");
}

#[test]
fn unknown_location_is_an_error() {
    let ws = Workspace::new();
    let missing = ws.path("not-here").to_string_lossy().into_owned();
    let mut context = CliContext::with_prompter(
        RenamexConfig::default(),
        Box::new(AcceptDefaults::quiet()),
        OutputFormat::Text,
    );
    let result = context.execute(&cli(&["-a", "-l", &missing]));
    assert!(matches!(result, Err(ApiError::DirectoryNotFound(_))));
}

#[test]
fn partial_rollback_exits_with_error() {
    let ws = Workspace::new();
    ws.write("IMG1.jpg", "x");
    let root = ws.root().to_string_lossy().into_owned();
    let mut config = RenamexConfig::default();
    config.rename.duplicate_strategy = DuplicateStrategy::Skip;
    let mut context = CliContext::with_prompter(
        config,
        Box::new(AcceptDefaults::quiet()),
        OutputFormat::Text,
    );
    context
        .execute(&cli(&[
            "-l", &root, "-p", "IMG", "--current-start", "1", "--current-end", "1",
            "--new-start", "2",
        ]))
        .unwrap();
    ws.write("IMG1.jpg", "someone else");

    let result = context.execute(&cli(&["-r", "-l", &root]));
    match result {
        Err(ApiError::RollbackPartialFailure(paths)) => {
            assert_eq!(paths.len(), 1);
            assert!(paths[0].ends_with("IMG2.jpg"));
        }
        other => panic!("expected partial failure, got {:?}", other),
    }
}
