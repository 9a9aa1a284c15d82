//! Dispatching parsed input to handlers
//!
//! Resolution walks the parsed matches down the command tree, picks the
//! selected command (or the root of the deepest CLI level reached), maps
//! public argument names back to handler parameters, and snapshots the
//! root-level values of every level passed through as global arguments.

use crate::definition::{Primitive, Value};
use crate::error::{DispatchError, DispatchResult, Result};
use crate::registry::{Action, Arity, ArgumentDescriptor, Command, CommandTree};
use crate::runner::{GlobalArgs, Handler, Invocation, Outcome};
use clap::parser::MatchesError;
use clap::ArgMatches;
use std::any::Any;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Selected command and the arguments it will be called with
#[derive(Debug)]
pub struct Resolution<'a> {
    /// Sub-CLI names from the top level to the level owning the command
    pub level: Vec<String>,
    pub command: &'a Command,
    /// Whether the command is the root of its level
    pub is_root: bool,
    pub invocation: Invocation,
}

/// Result of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// Sub-CLI path of the level whose usage applies
    pub level: Vec<String>,
    /// Canonical name of the command that ran
    pub command: String,
    pub outcome: Outcome,
}

/// Find the selected command and build its invocation
pub fn resolve<'a>(tree: &'a CommandTree, matches: &ArgMatches) -> DispatchResult<Resolution<'a>> {
    let mut globals = GlobalArgs::new();
    let mut level = Vec::new();
    let mut tree = tree;
    let mut matches = matches;

    loop {
        match matches.subcommand() {
            Some((name, sub_matches)) => {
                // Root values of a level are global once we go past it
                collect_values(&tree.root, matches, |public, value| {
                    globals.insert(public, value);
                })?;

                if let Some(command) = tree.command(name) {
                    let args = command_args(command, sub_matches)?;
                    return Ok(finish(level, command, false, args, globals));
                }

                let subtree = tree
                    .subcli(name)
                    .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
                level.push(name.to_string());
                tree = subtree;
                matches = sub_matches;
            }
            None => {
                let args = command_args(&tree.root, matches)?;
                return Ok(finish(level, &tree.root, true, args, globals));
            }
        }
    }
}

fn finish<'a>(
    level: Vec<String>,
    command: &'a Command,
    is_root: bool,
    args: BTreeMap<String, Value>,
    globals: GlobalArgs,
) -> Resolution<'a> {
    debug!(
        command = %command.name,
        level = %level.join(" "),
        globals = globals.len(),
        "resolved command"
    );
    let invocation = Invocation {
        command: command.name.clone(),
        args,
        globals: Arc::new(globals),
    };
    Resolution {
        level,
        command,
        is_root,
        invocation,
    }
}

/// Handler keyword arguments, keyed by parameter name
fn command_args(command: &Command, matches: &ArgMatches) -> DispatchResult<BTreeMap<String, Value>> {
    let mut args = BTreeMap::new();
    collect_values(command, matches, |public, value| {
        let param = command.param_name(public).unwrap_or(public).to_string();
        args.insert(param, value);
    })?;
    Ok(args)
}

fn collect_values<F>(command: &Command, matches: &ArgMatches, mut sink: F) -> DispatchResult<()>
where
    F: FnMut(&str, Value),
{
    for descriptor in &command.args {
        let value = match read_value(descriptor, matches)? {
            Some(value) => value,
            None => descriptor
                .default
                .clone()
                .ok_or_else(|| DispatchError::MissingValue(descriptor.public_name.clone()))?,
        };
        sink(&descriptor.public_name, value);
    }
    Ok(())
}

/// Read one argument back from the matches with its registered value type
fn read_value(descriptor: &ArgumentDescriptor, matches: &ArgMatches) -> DispatchResult<Option<Value>> {
    if descriptor.action == Action::SetTrue {
        let present = read_one::<bool>(descriptor, matches)?.unwrap_or(false);
        return Ok(Some(Value::Bool(present)));
    }

    let multiple = matches!(descriptor.arity, Arity::ZeroOrMore | Arity::OneOrMore);
    let value = match descriptor.value_type {
        Primitive::Str => read_typed::<String>(descriptor, matches, multiple, Value::Str)?,
        Primitive::Int => read_typed::<i64>(descriptor, matches, multiple, Value::Int)?,
        Primitive::Float => read_typed::<f64>(descriptor, matches, multiple, Value::Float)?,
        Primitive::Bool => read_typed::<bool>(descriptor, matches, multiple, Value::Bool)?,
        Primitive::Path => read_typed::<PathBuf>(descriptor, matches, multiple, Value::Path)?,
    };
    Ok(value)
}

fn read_typed<T>(
    descriptor: &ArgumentDescriptor,
    matches: &ArgMatches,
    multiple: bool,
    wrap: fn(T) -> Value,
) -> DispatchResult<Option<Value>>
where
    T: Any + Clone + Send + Sync + 'static,
{
    if multiple {
        let values = matches
            .try_get_many::<T>(&descriptor.public_name)
            .map_err(|e| matches_error(descriptor, e))?;
        Ok(values.map(|values| Value::List(values.cloned().map(wrap).collect())))
    } else {
        Ok(read_one::<T>(descriptor, matches)?.map(wrap))
    }
}

fn read_one<T>(descriptor: &ArgumentDescriptor, matches: &ArgMatches) -> DispatchResult<Option<T>>
where
    T: Any + Clone + Send + Sync + 'static,
{
    matches
        .try_get_one::<T>(&descriptor.public_name)
        .map(|value| value.cloned())
        .map_err(|e| matches_error(descriptor, e))
}

fn matches_error(descriptor: &ArgumentDescriptor, error: MatchesError) -> DispatchError {
    DispatchError::Matches {
        name: descriptor.public_name.clone(),
        error: error.to_string(),
    }
}

/// Run the resolved handler, blocking on it if it is asynchronous
pub fn invoke(resolution: Resolution<'_>) -> Result<Dispatched> {
    let Resolution {
        level,
        command,
        is_root,
        invocation,
    } = resolution;

    debug!(command = %command.name, root = is_root, "dispatching");
    let outcome = match &command.handler {
        Handler::Sync(f) => f(invocation)?,
        Handler::Async(f) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(f(invocation))?
        }
    };

    Ok(Dispatched {
        level,
        command: command.name.clone(),
        outcome,
    })
}

/// Resolve and invoke in one step
pub fn dispatch(tree: &CommandTree, matches: &ArgMatches) -> Result<Dispatched> {
    let resolution = resolve(tree, matches)?;
    invoke(resolution)
}
