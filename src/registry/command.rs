//! Command registry
//!
//! Builds the immutable [`CommandTree`] of a CLI definition: the root command,
//! the named commands with their aliases, and nested sub-CLIs.

use crate::definition::{Cli, CommandDef, ROOT_HANDLER};
use crate::error::{BuildError, BuildResult};
use crate::registry::{build_arguments, dash_case, inspect, ArgumentDescriptor};
use crate::runner::Handler;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A registered, user-invocable command
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    /// Canonical name, never an alias
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Arguments in parameter declaration order
    pub args: Vec<ArgumentDescriptor>,
    #[serde(skip)]
    pub handler: Handler,
    /// Public argument name to handler parameter name
    #[serde(skip)]
    inverse_names: BTreeMap<String, String>,
}

impl Command {
    /// Build a command from a definition under its resolved name
    pub fn from_def(def: &CommandDef) -> BuildResult<Self> {
        let name = resolve_name(def)?;

        if def.overrides.aliases.iter().any(|alias| alias.is_empty()) {
            return Err(BuildError::EmptyCommandName);
        }

        let metas = inspect(def)?;
        let args = build_arguments(&name, &metas, &def.overrides)?;
        let inverse_names = args
            .iter()
            .map(|arg| (arg.public_name.clone(), arg.param_name.clone()))
            .collect();

        Ok(Command {
            name,
            aliases: def.overrides.aliases.clone(),
            doc: def.doc.clone(),
            args,
            handler: def.handler.clone(),
            inverse_names,
        })
    }

    /// Descriptor registered under a public name
    pub fn arg(&self, public_name: &str) -> Option<&ArgumentDescriptor> {
        self.args.iter().find(|arg| arg.public_name == public_name)
    }

    /// Handler parameter fed by a public argument name
    pub fn param_name(&self, public_name: &str) -> Option<&str> {
        self.inverse_names.get(public_name).map(String::as_str)
    }

    /// First line of the doc text, used in command listings
    pub fn summary(&self) -> Option<&str> {
        self.doc
            .as_deref()
            .and_then(|doc| doc.lines().map(str::trim).find(|line| !line.is_empty()))
    }
}

fn resolve_name(def: &CommandDef) -> BuildResult<String> {
    let name = match &def.overrides.name {
        Some(name) => name.clone(),
        None => dash_case(&def.handler_name),
    };
    if name.is_empty() {
        return Err(BuildError::EmptyCommandName);
    }
    Ok(name)
}

/// All commands of one CLI definition, with nested sub-CLIs
#[derive(Debug, Clone, Serialize)]
pub struct CommandTree {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub root: Command,
    commands: Vec<Command>,
    /// Canonical names and aliases to positions in `commands`
    #[serde(skip)]
    index: BTreeMap<String, usize>,
    subclis: BTreeMap<String, CommandTree>,
}

impl CommandTree {
    /// Look up a command by canonical name or alias
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&i| &self.commands[i])
    }

    /// Commands in registration order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn subcli(&self, name: &str) -> Option<&CommandTree> {
        self.subclis.get(name)
    }

    pub fn subclis(&self) -> impl Iterator<Item = (&str, &CommandTree)> {
        self.subclis.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    fn insert(&mut self, command: Command) -> BuildResult<()> {
        let position = self.commands.len();
        for key in std::iter::once(&command.name).chain(&command.aliases) {
            if self.index.insert(key.clone(), position).is_some() {
                return Err(BuildError::DuplicateCommand(key.clone()));
            }
        }
        debug!(command = %command.name, aliases = ?command.aliases, "registered command");
        self.commands.push(command);
        Ok(())
    }
}

/// Register every exposed handler and sub-CLI of a definition
pub fn register(cli: &Cli) -> BuildResult<CommandTree> {
    let mut root = match &cli.root {
        Some(def) => Command::from_def(def)?,
        None => Command::from_def(&CommandDef::with_handler(ROOT_HANDLER, Handler::show_help()))?,
    };
    // The root is reached without naming it
    root.name = cli.name.clone();

    let mut tree = CommandTree {
        name: cli.name.clone(),
        about: cli.about.clone(),
        root,
        commands: Vec::new(),
        index: BTreeMap::new(),
        subclis: BTreeMap::new(),
    };

    for def in cli.commands.iter().filter(|def| def.is_exposed()) {
        tree.insert(Command::from_def(def)?)?;
    }

    for (name, subcli) in &cli.subclis {
        if name.starts_with('_') {
            continue;
        }
        if tree.index.contains_key(name) || tree.subclis.contains_key(name) {
            return Err(BuildError::DuplicateCommand(name.clone()));
        }
        let subtree = register(subcli)?;
        debug!(subcli = %name, commands = subtree.commands.len(), "registered sub-CLI");
        tree.subclis.insert(name.clone(), subtree);
    }

    Ok(tree)
}
