//! Integration tests for parsing and dispatch

mod common;

use cliar::definition::{Cli, CommandDef, Param, Primitive, TypeTag};
use cliar::error::CliarError;
use cliar::runner::Outcome;
use cliar::App;
use common::Recorder;
use std::path::PathBuf;

fn parse_error_kind(err: CliarError) -> clap::error::ErrorKind {
    match err {
        CliarError::Parse(e) => e.kind(),
        other => panic!("expected a parse error, got: {}", other),
    }
}

#[test]
fn test_boolean_flag_defaults_to_false() {
    let recorder = Recorder::new();
    let cli = Cli::new("tool").command(
        recorder
            .command("build")
            .param(Param::new("release").default(false)),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["tool", "build"]).unwrap();
    app.run_from(["tool", "build", "--release"]).unwrap();
    app.run_from(["tool", "build", "-r"]).unwrap();

    let seen: Vec<bool> = recorder
        .calls()
        .iter()
        .map(|call| call.get::<bool>("release").unwrap())
        .collect();
    assert_eq!(seen, vec![false, true, true]);
}

#[test]
fn test_boolean_without_default_is_positional() {
    let recorder = Recorder::new();
    let cli = Cli::new("tool").command(
        recorder
            .command("set")
            .param(Param::new("enabled").typed(Primitive::Bool)),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["tool", "set", "true"]).unwrap();
    assert!(recorder.last().get::<bool>("enabled").unwrap());

    let err = app.run_from(["tool", "set", "maybe"]).unwrap_err();
    assert_eq!(parse_error_kind(err), clap::error::ErrorKind::InvalidValue);
}

#[test]
fn test_sequence_takes_every_token() {
    let recorder = Recorder::new();
    let cli = Cli::new("math").command(
        recorder
            .command("summ")
            .param(Param::new("numbers").typed(TypeTag::list(Primitive::Int))),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["math", "summ", "1", "2", "42", "101"]).unwrap();
    let numbers = recorder.last().get::<Vec<i64>>("numbers").unwrap();
    assert_eq!(numbers, vec![1, 2, 42, 101]);

    let err = app.run_from(["math", "summ"]).unwrap_err();
    assert_eq!(
        parse_error_kind(err),
        clap::error::ErrorKind::MissingRequiredArgument
    );

    let err = app.run_from(["math", "summ", "1", "two"]).unwrap_err();
    assert_eq!(parse_error_kind(err), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn test_optional_sequence_default() {
    let recorder = Recorder::new();
    let cli = Cli::new("math").command(
        recorder.command("avg").param(
            Param::new("numbers")
                .typed(TypeTag::list(Primitive::Float))
                .default(vec![1, 2, 3]),
        ),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["math", "avg"]).unwrap();
    app.run_from(["math", "avg", "--numbers", "4", "5"]).unwrap();

    let calls = recorder.calls();
    assert_eq!(calls[0].get::<Vec<f64>>("numbers").unwrap(), vec![1.0, 2.0, 3.0]);
    assert_eq!(calls[1].get::<Vec<f64>>("numbers").unwrap(), vec![4.0, 5.0]);
}

#[test]
fn test_empty_string_default_reaches_handler() {
    let recorder = Recorder::new();
    let cli = Cli::new("shell").command(
        recorder
            .command("connect")
            .param(Param::new("host"))
            .param(Param::new("password").default("")),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["shell", "connect", "example.com"]).unwrap();
    let call = recorder.last();
    assert_eq!(call.get::<String>("host").unwrap(), "example.com");
    assert_eq!(call.get::<String>("password").unwrap(), "");
}

#[test]
fn test_path_parameter() {
    let recorder = Recorder::new();
    let cli = Cli::new("files").command(
        recorder
            .command("show")
            .param(Param::new("file").typed(Primitive::Path)),
    );
    let app = App::new(&cli).unwrap();

    app.run_from(["files", "show", "notes/today.txt"]).unwrap();
    assert_eq!(
        recorder.last().get::<PathBuf>("file").unwrap(),
        PathBuf::from("notes/today.txt")
    );
}

#[test]
fn test_globals_reach_nested_handlers() {
    let recorder = Recorder::new();
    let utils = Cli::new("utils").command(recorder.command("upload").param(Param::new("file")));
    let cli = Cli::new("shell")
        .root(
            CommandDef::new("_root", |_| Ok(Outcome::ShowHelp))
                .param(Param::new("user").default(""))
                .param(Param::new("password").default(""))
                .arg_name("user", "as")
                .short("user", None),
        )
        .subcli("utils", utils);
    let app = App::new(&cli).unwrap();

    let dispatched = app
        .run_from(["shell", "--as", "alice", "-p", "secret", "utils", "upload", "file.txt"])
        .unwrap();
    assert_eq!(dispatched.command, "upload");
    assert_eq!(dispatched.level, vec!["utils".to_string()]);

    let call = recorder.last();
    assert_eq!(call.get::<String>("file").unwrap(), "file.txt");
    assert_eq!(call.globals().get::<String>("as").unwrap(), "alice");
    assert_eq!(call.globals().get::<String>("password").unwrap(), "secret");
}

#[test]
fn test_globals_default_when_not_given() {
    let recorder = Recorder::new();
    let cli = Cli::new("shell")
        .root(
            CommandDef::new("_root", |_| Ok(Outcome::ShowHelp))
                .param(Param::new("user").default("guest")),
        )
        .command(recorder.command("connect").param(Param::new("host")));
    let app = App::new(&cli).unwrap();

    app.run_from(["shell", "connect", "example.com"]).unwrap();
    assert_eq!(recorder.last().globals().get::<String>("user").unwrap(), "guest");
}

#[test]
fn test_sub_cli_root_runs_without_command() {
    let recorder = Recorder::new();
    let remote = Cli::new("remote").root(recorder.command("_root"));
    let cli = Cli::new("git").subcli("remote", remote);
    let app = App::new(&cli).unwrap();

    let dispatched = app.run_from(["git", "remote"]).unwrap();
    assert_eq!(dispatched.outcome, Outcome::Handled);
    assert_eq!(dispatched.command, "remote");
    assert_eq!(recorder.calls().len(), 1);
}

#[test]
fn test_show_help_uses_owning_level() {
    let cli = Cli::new("git")
        .about("Git-like CLI.")
        .subcli("flow", Cli::new("flow").about("Branching workflows."));
    let app = App::new(&cli).unwrap();

    let dispatched = app.run_from(["git", "flow"]).unwrap();
    assert_eq!(dispatched.outcome, Outcome::ShowHelp);
    assert_eq!(dispatched.level, vec!["flow".to_string()]);
    assert!(app.render_help(&dispatched.level).contains("Branching workflows."));
}

#[test]
fn test_handler_errors_propagate() {
    let cli = Cli::new("tool").command(CommandDef::new("fail", |_| {
        anyhow::bail!("boom")
    }));
    let app = App::new(&cli).unwrap();

    let err = app.run_from(["tool", "fail"]).unwrap_err();
    assert!(matches!(err, CliarError::Handler(_)));
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_unknown_command_is_parse_error() {
    let cli = Cli::new("tool").command(CommandDef::new("build", |_| Ok(Outcome::Handled)));
    let app = App::new(&cli).unwrap();

    let err = app.run_from(["tool", "deploy"]).unwrap_err();
    assert_eq!(parse_error_kind(err), clap::error::ErrorKind::InvalidSubcommand);
}
