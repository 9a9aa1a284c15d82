//! Git-like CLI with nested sub-CLIs

use cliar::cli::{init_logging, report_error, run};
use cliar::definition::{Cli, CommandDef, Param};
use cliar::runner::Outcome;
use std::process;

fn say(handler: &str, line: &'static str) -> CommandDef {
    CommandDef::new(handler, move |_| {
        println!("{}", line);
        Ok(Outcome::Handled)
    })
}

fn remote() -> Cli {
    Cli::new("remote")
        .about("Manage set of tracked repositories.")
        .root(say("_root", "Remote root."))
        .command(
            CommandDef::new("add", |inv| {
                println!("Adding remote {}", inv.get::<String>("name")?);
                Ok(Outcome::Handled)
            })
            .param(Param::new("name")),
        )
        .command(say("show", "Showing remotes."))
}

fn feature() -> Cli {
    Cli::new("feature").command(
        CommandDef::new("start", |inv| {
            println!("Starting feature {}", inv.get::<String>("name")?);
            Ok(Outcome::Handled)
        })
        .param(Param::new("name")),
    )
}

fn git() -> Cli {
    Cli::new("git")
        .about("Git-like CLI built with cliar.")
        .root(say("_root", "Git root."))
        .command(
            CommandDef::new("branch", |inv| {
                println!("Creating branch {}", inv.get::<String>("name")?);
                Ok(Outcome::Handled)
            })
            .doc("Create a branch.")
            .param(Param::new("name")),
        )
        .subcli("remote", remote())
        .subcli("flow", Cli::new("flow").subcli("feature", feature()))
}

fn main() {
    init_logging();

    if let Err(e) = run(&git()) {
        report_error(&e);
        process::exit(1);
    }
}
