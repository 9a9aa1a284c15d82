//! Parser assembly
//!
//! Walks a [`CommandTree`] depth-first and registers every argument
//! descriptor with clap, one `Arg` per descriptor, in declaration order.

use crate::definition::{Primitive, Value};
use crate::registry::{Action, Arity, ArgumentDescriptor, Command as CliCommand, CommandTree};
use clap::builder::ValueParser;
use clap::{value_parser, Arg, ArgAction, Command};
use tracing::trace;

/// Build the complete clap command for a tree
pub fn assemble(tree: &CommandTree) -> Command {
    let mut cmd = Command::new(tree.name.clone());
    if let Some(about) = &tree.about {
        cmd = cmd.about(about.clone());
    }
    assemble_level(cmd, tree)
}

/// Register a tree level: root arguments, commands, then sub-CLIs
///
/// `help` is left free for user commands; `-h/--help` still prints usage.
fn assemble_level(mut cmd: Command, tree: &CommandTree) -> Command {
    cmd = add_args(cmd.disable_help_subcommand(true), &tree.root);

    for command in tree.commands() {
        trace!(command = %command.name, args = command.args.len(), "assembling command");
        let sub = Command::new(command.name.clone()).visible_aliases(command.aliases.clone());
        let sub = describe(sub, command);
        cmd = cmd.subcommand(add_args(sub, command));
    }

    for (name, subtree) in tree.subclis() {
        trace!(subcli = %name, "assembling sub-CLI");
        let mut sub = Command::new(name.to_string());
        if let Some(about) = &subtree.about {
            sub = sub.about(about.clone());
        }
        cmd = cmd.subcommand(assemble_level(sub, subtree));
    }

    cmd
}

/// Summary line for the parent listing, full doc as the description
fn describe(mut cmd: Command, command: &CliCommand) -> Command {
    if let Some(summary) = command.summary() {
        cmd = cmd.about(summary.to_string());
    }
    if let Some(doc) = &command.doc {
        cmd = cmd.long_about(doc.trim().to_string());
    }
    cmd
}

fn add_args(mut cmd: Command, command: &CliCommand) -> Command {
    for descriptor in &command.args {
        cmd = cmd.arg(to_arg(descriptor));
    }
    cmd
}

/// The single clap registration for one descriptor
pub fn to_arg(descriptor: &ArgumentDescriptor) -> Arg {
    let mut arg = Arg::new(descriptor.public_name.clone());

    if descriptor.is_positional() {
        arg = arg.required(true);
    } else {
        arg = arg.long(descriptor.public_name.clone());
        if let Some(short) = descriptor.short_name {
            arg = arg.short(short);
        }
    }

    if let Some(help) = &descriptor.help {
        arg = arg.help(help.clone());
    }

    if descriptor.action == Action::SetTrue {
        return arg.action(ArgAction::SetTrue);
    }

    arg = arg
        .action(ArgAction::Set)
        .value_parser(value_parser_for(descriptor.value_type));

    arg = match descriptor.arity {
        Arity::Single => arg.num_args(1),
        Arity::ZeroOrMore => arg.num_args(0..),
        Arity::OneOrMore => arg.num_args(1..),
        Arity::Presence => arg.num_args(0),
    };

    if descriptor.value_type.is_numeric() {
        arg = arg.allow_negative_numbers(true);
    }

    match &descriptor.metavar {
        Some(metavar) => arg = arg.value_name(metavar.clone()),
        None if !descriptor.is_positional() => {
            arg = arg.value_name(descriptor.public_name.to_uppercase())
        }
        None => {}
    }

    // Empty defaults are filled in at dispatch time
    if let Some(default) = descriptor.default.as_ref().filter(|d| !d.is_empty()) {
        arg = match descriptor.arity {
            Arity::ZeroOrMore | Arity::OneOrMore => match default {
                Value::List(items) => {
                    arg.default_values(items.iter().map(|item| item.to_string()))
                }
                other => arg.default_value(other.to_string()),
            },
            _ => arg.default_value(default.to_string()),
        };
    }

    arg
}

fn value_parser_for(primitive: Primitive) -> ValueParser {
    match primitive {
        Primitive::Str => ValueParser::string(),
        Primitive::Int => value_parser!(i64).into(),
        Primitive::Float => value_parser!(f64).into(),
        Primitive::Bool => ValueParser::bool(),
        Primitive::Path => ValueParser::path_buf(),
    }
}
