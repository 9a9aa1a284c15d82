//! Argument descriptors
//!
//! Each handler parameter becomes exactly one [`ArgumentDescriptor`]. The
//! rules, applied in declaration order:
//!
//! - no default: positional and required
//! - a default: optional, exposed as `-x/--xxx` (or `--xxx` only)
//! - boolean with a `false` default: a switch that sets `true` when present
//! - sequence: one-or-more values, zero-or-more when the default is non-empty

use crate::definition::{Overrides, Primitive, Value};
use crate::error::{BuildError, BuildResult};
use crate::registry::{ParamMeta, ParamType};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;

static ARGUMENT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("valid argument regex"));

/// Names clap reserves for the generated help flag
const HELP_LONG: &str = "help";
const HELP_SHORT: char = 'h';

/// How many value tokens an argument consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    Single,
    ZeroOrMore,
    OneOrMore,
    /// Presence only, no value
    Presence,
}

/// What happens when the argument is seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Store,
    SetTrue,
}

/// Normalized specification of one command-line argument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentDescriptor {
    /// Handler parameter this argument feeds
    pub param_name: String,
    pub public_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    pub value_type: Primitive,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub arity: Arity,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metavar: Option<String>,
}

impl ArgumentDescriptor {
    /// Arguments without a default are positional
    pub fn is_positional(&self) -> bool {
        self.default.is_none()
    }

    pub fn is_switch(&self) -> bool {
        self.action == Action::SetTrue
    }
}

/// Default public name: the parameter name with dashes for underscores
pub fn dash_case(name: &str) -> String {
    name.replace('_', "-")
}

/// Build the argument descriptors of one command
///
/// `command` only names the command in errors.
pub fn build_arguments(
    command: &str,
    metas: &[ParamMeta],
    overrides: &Overrides,
) -> BuildResult<Vec<ArgumentDescriptor>> {
    let mut descriptors = Vec::with_capacity(metas.len());

    for meta in metas {
        descriptors.push(build_argument(command, meta, overrides)?);
    }

    check_unique(command, &descriptors)?;
    check_variadic_positionals(command, &descriptors)?;

    Ok(descriptors)
}

fn build_argument(
    command: &str,
    meta: &ParamMeta,
    overrides: &Overrides,
) -> BuildResult<ArgumentDescriptor> {
    let public_name = overrides
        .arg_map
        .get(&meta.name)
        .cloned()
        .unwrap_or_else(|| dash_case(&meta.name));

    if !ARGUMENT_NAME.is_match(&public_name) {
        return Err(BuildError::InvalidArgumentName {
            command: command.to_string(),
            name: public_name,
        });
    }

    let (arity, action) = match (meta.ty, &meta.default) {
        (ParamType::Scalar(Primitive::Bool), Some(Value::Bool(true))) => {
            return Err(BuildError::TrueBooleanDefault {
                command: command.to_string(),
                param: meta.name.clone(),
            });
        }
        (ParamType::Scalar(Primitive::Bool), Some(_)) => (Arity::Presence, Action::SetTrue),
        (ParamType::Sequence(_), Some(default)) if !default.is_empty() => {
            (Arity::ZeroOrMore, Action::Store)
        }
        (ParamType::Sequence(_), _) => (Arity::OneOrMore, Action::Store),
        (ParamType::Scalar(_), _) => (Arity::Single, Action::Store),
    };

    let short_name = if meta.has_default() {
        match overrides.short_map.get(&meta.name) {
            Some(short) => *short,
            None => public_name.chars().next(),
        }
    } else {
        None
    };

    if let Some(short) = short_name.filter(|c| !c.is_ascii_alphanumeric()) {
        return Err(BuildError::InvalidArgumentName {
            command: command.to_string(),
            name: format!("-{}", short),
        });
    }

    let metavar = if action == Action::SetTrue {
        None
    } else {
        overrides.metavar_map.get(&meta.name).cloned()
    };

    Ok(ArgumentDescriptor {
        param_name: meta.name.clone(),
        public_name,
        short_name,
        value_type: meta.ty.element(),
        default: meta.default.clone(),
        arity,
        action,
        help: overrides.help_map.get(&meta.name).cloned(),
        metavar,
    })
}

/// No two arguments may share a public name or a short flag
fn check_unique(command: &str, descriptors: &[ArgumentDescriptor]) -> BuildResult<()> {
    let mut longs: HashSet<&str> = HashSet::from([HELP_LONG]);
    let mut shorts: HashSet<char> = HashSet::from([HELP_SHORT]);

    for descriptor in descriptors {
        if !longs.insert(descriptor.public_name.as_str()) {
            return Err(BuildError::DuplicateArgument {
                command: command.to_string(),
                argument: descriptor.public_name.clone(),
            });
        }
        if let Some(short) = descriptor.short_name {
            if !shorts.insert(short) {
                return Err(BuildError::DuplicateArgument {
                    command: command.to_string(),
                    argument: format!("-{}", short),
                });
            }
        }
    }

    Ok(())
}

/// A positional consuming several tokens must come last
fn check_variadic_positionals(
    command: &str,
    descriptors: &[ArgumentDescriptor],
) -> BuildResult<()> {
    let positionals: Vec<&ArgumentDescriptor> =
        descriptors.iter().filter(|d| d.is_positional()).collect();

    if let Some((_, init)) = positionals.split_last() {
        if let Some(variadic) = init.iter().find(|d| d.arity != Arity::Single) {
            return Err(BuildError::VariadicPositionalNotLast {
                command: command.to_string(),
                argument: variadic.public_name.clone(),
            });
        }
    }

    Ok(())
}
