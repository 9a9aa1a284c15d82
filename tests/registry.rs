//! Integration tests for command registration

mod common;

use cliar::definition::{parse_overrides, parse_overrides_file, Cli, CommandDef, Param, Primitive, TypeTag};
use cliar::error::{BuildError, CliarError};
use cliar::registry::{register, Action, Arity};
use cliar::runner::Outcome;
use cliar::App;
use common::{create_temp_file, Recorder};

fn noop(name: &str) -> CommandDef {
    CommandDef::new(name, |_| Ok(Outcome::Handled))
}

fn game() -> Cli {
    Cli::new("game")
        .about("Random games.")
        .command(
            noop("get_random_number")
                .param(Param::new("low").typed(Primitive::Int))
                .param(Param::new("max").default(100))
                .param(Param::new("seed").default(0.5))
                .param(Param::new("label").default("roll"))
                .param(Param::new("verbose").default(false))
                .param(Param::new("faces").typed(TypeTag::list(Primitive::Int)).default(vec![1, 6]))
                .name("get-random")
                .aliases(["gr", "randint"]),
        )
        .command(noop("scores").param(Param::new("values").typed(TypeTag::list(Primitive::Float))))
}

#[test]
fn test_defaults_make_arguments_optional() {
    let tree = register(&game()).unwrap();
    let command = tree.command("get-random").unwrap();

    for descriptor in &command.args {
        let has_default = descriptor.default.is_some();
        assert_eq!(
            descriptor.is_positional(),
            !has_default,
            "{} positional iff no default",
            descriptor.public_name
        );
        if !has_default {
            assert!(descriptor.short_name.is_none());
        }
    }

    let low = command.arg("low").unwrap();
    assert!(low.is_positional());
    assert_eq!(low.arity, Arity::Single);

    let verbose = command.arg("verbose").unwrap();
    assert_eq!(verbose.action, Action::SetTrue);
    assert_eq!(verbose.arity, Arity::Presence);

    let faces = command.arg("faces").unwrap();
    assert_eq!(faces.arity, Arity::ZeroOrMore);
    assert_eq!(faces.value_type, Primitive::Int);
}

#[test]
fn test_sequence_without_default_is_positional_one_or_more() {
    let tree = register(&game()).unwrap();
    let values = tree.command("scores").unwrap().arg("values").unwrap();

    assert!(values.is_positional());
    assert_eq!(values.arity, Arity::OneOrMore);
    assert_eq!(values.value_type, Primitive::Float);
}

#[test]
fn test_registration_is_idempotent() {
    let cli = game();
    let first = App::new(&cli).unwrap().describe().unwrap();
    let second = App::new(&cli).unwrap().describe().unwrap();
    assert_eq!(first, second);

    let rebuilt = App::new(&game()).unwrap().describe().unwrap();
    assert_eq!(first, rebuilt);
}

#[test]
fn test_aliases_reach_canonical_command() {
    let recorder = Recorder::new();
    let cli = Cli::new("game").command(
        recorder
            .command("get_random_number")
            .param(Param::new("max").default(100))
            .name("get-random")
            .aliases(["gr", "randint"]),
    );
    let app = App::new(&cli).unwrap();

    for invoked in ["get-random", "gr", "randint"] {
        let dispatched = app.run_from(["game", invoked, "--max", "7"]).unwrap();
        assert_eq!(dispatched.command, "get-random");
    }

    let calls = recorder.calls();
    assert_eq!(calls.len(), 3);
    for call in calls {
        assert_eq!(call.command, "get-random");
        assert_eq!(call.get::<i64>("max").unwrap(), 7);
    }
}

#[test]
fn test_duplicate_short_name_fails_at_construction() {
    let cli = Cli::new("shell").command(
        noop("connect")
            .param(Param::new("port").default(22))
            .param(Param::new("password").default("")),
    );

    let err = App::new(&cli).err().expect("construction must fail");
    match err {
        CliarError::Build(BuildError::DuplicateArgument { command, argument }) => {
            assert_eq!(command, "connect");
            assert_eq!(argument, "-p");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_composed_clis_detect_conflicts() {
    let base = Cli::new("tool").command(noop("build"));
    let extra = Cli::new("extra").command(noop("build"));

    let err = register(&base.extend(extra)).unwrap_err();
    assert!(matches!(err, BuildError::DuplicateCommand(name) if name == "build"));
}

#[test]
fn test_composed_clis_merge_commands() {
    let base = Cli::new("tool").command(noop("build"));
    let extra = Cli::new("extra").command(noop("clean"));

    let tree = register(&base.extend(extra)).unwrap();
    let names: Vec<&str> = tree.commands().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["build", "clean"]);
    assert_eq!(tree.name, "tool");
}

#[test]
fn test_overrides_from_yaml() {
    let catalog = parse_overrides(
        r#"
get_random_number:
  aliases: [dice]
  help_map:
    max: Upper bound
  metavar_map:
    max: MAX
"#,
    )
    .unwrap();

    let cli = game().apply_overrides(catalog).unwrap();
    let tree = register(&cli).unwrap();

    let command = tree.command("dice").unwrap();
    assert_eq!(command.name, "get-random");
    let high = command.arg("max").unwrap();
    assert_eq!(high.help.as_deref(), Some("Upper bound"));
    assert_eq!(high.metavar.as_deref(), Some("MAX"));
}

#[test]
fn test_overrides_file_for_unknown_handler() {
    let (_dir, path) = create_temp_file("overrides.yml", "missing:\n  name: gone\n");
    let catalog = parse_overrides_file(&path).unwrap();

    let err = game().apply_overrides(catalog).err().unwrap();
    assert!(matches!(err, BuildError::UnknownHandler(name) if name == "missing"));
}

#[test]
fn test_command_named_help_is_dispatched() {
    let recorder = Recorder::new();
    let cli = Cli::new("doc")
        .command(recorder.command("help").param(Param::new("topic").default("intro")))
        .command(noop("build"));
    let app = App::new(&cli).unwrap();

    let dispatched = app.run_from(["doc", "help", "--topic", "usage"]).unwrap();
    assert_eq!(dispatched.command, "help");
    assert_eq!(recorder.last().get::<String>("topic").unwrap(), "usage");

    let err = app.run_from(["doc", "--help"]).unwrap_err();
    assert!(matches!(err, CliarError::Parse(e) if e.kind() == clap::error::ErrorKind::DisplayHelp));
}

#[test]
fn test_invalid_short_override_fails_at_construction() {
    let cli = Cli::new("tool").command(
        noop("run")
            .param(Param::new("quiet").default(1))
            .short("quiet", Some('-')),
    );

    let err = App::new(&cli).err().expect("construction must fail");
    match err {
        CliarError::Build(BuildError::InvalidArgumentName { command, name }) => {
            assert_eq!(command, "run");
            assert_eq!(name, "--");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_empty_handler_name_fails_at_construction() {
    let cli = Cli::new("tool").command(noop(""));

    let err = App::new(&cli).err().expect("construction must fail");
    assert!(matches!(err, CliarError::Build(BuildError::EmptyCommandName)));
}
