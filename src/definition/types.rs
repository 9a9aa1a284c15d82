//! Declared CLI definitions
//!
//! A [`Cli`] is a named list of command sources. Each [`CommandDef`] declares a
//! handler's parameters together with the overrides that shape its command.

use crate::definition::{TypeTag, Value};
use crate::error::{BuildError, BuildResult};
use crate::runner::{Handler, HandlerResult, Invocation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;

/// Conventional handler name of a CLI's root command
pub const ROOT_HANDLER: &str = "_root";

/// One declared handler parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Option<TypeTag>,
    pub default: Option<Value>,
}

impl Param {
    /// An untyped parameter without default
    pub fn new(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    /// Declare the parameter's type
    pub fn typed(mut self, ty: impl Into<TypeTag>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Give the parameter a default, which makes it an optional flag
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Boolean switch, off unless given
    pub fn flag(name: impl Into<String>) -> Self {
        Param::new(name).default(false)
    }
}

/// Declarative per-command overrides
///
/// Maps are keyed by handler parameter name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Overrides {
    /// Command name instead of the dash-cased handler name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Public argument names
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub arg_map: BTreeMap<String, String>,

    /// Short flags; `None` suppresses the short flag
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub short_map: BTreeMap<String, Option<char>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metavar_map: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub help_map: BTreeMap<String, String>,

    /// Keep the handler out of the command list
    pub ignore: bool,
}

impl Overrides {
    /// Layer `other` on top of these overrides
    pub fn merge(&mut self, other: Overrides) {
        if other.name.is_some() {
            self.name = other.name;
        }
        self.aliases.extend(other.aliases);
        self.arg_map.extend(other.arg_map);
        self.short_map.extend(other.short_map);
        self.metavar_map.extend(other.metavar_map);
        self.help_map.extend(other.help_map);
        self.ignore |= other.ignore;
    }
}

/// A handler together with its declared signature
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub handler_name: String,
    pub doc: Option<String>,
    pub params: Vec<Param>,
    pub overrides: Overrides,
    pub handler: Handler,
}

impl CommandDef {
    pub fn new<F>(handler_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Invocation) -> HandlerResult + Send + Sync + 'static,
    {
        Self::with_handler(handler_name, Handler::from_fn(f))
    }

    /// A command whose handler returns a future
    pub fn new_async<F, Fut>(handler_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::with_handler(handler_name, Handler::from_async(f))
    }

    pub fn with_handler(handler_name: impl Into<String>, handler: Handler) -> Self {
        CommandDef {
            handler_name: handler_name.into(),
            doc: None,
            params: Vec::new(),
            overrides: Overrides::default(),
            handler,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Param>) -> Self {
        self.params.extend(params);
        self
    }

    /// Set the command name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.overrides.name = Some(name.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overrides.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Expose `param` under a different argument name
    pub fn arg_name(mut self, param: impl Into<String>, public: impl Into<String>) -> Self {
        self.overrides.arg_map.insert(param.into(), public.into());
        self
    }

    /// Set or, with `None`, suppress the short flag of `param`
    pub fn short(mut self, param: impl Into<String>, short: Option<char>) -> Self {
        self.overrides.short_map.insert(param.into(), short);
        self
    }

    pub fn metavar(mut self, param: impl Into<String>, metavar: impl Into<String>) -> Self {
        self.overrides.metavar_map.insert(param.into(), metavar.into());
        self
    }

    pub fn help(mut self, param: impl Into<String>, help: impl Into<String>) -> Self {
        self.overrides.help_map.insert(param.into(), help.into());
        self
    }

    pub fn ignore(mut self) -> Self {
        self.overrides.ignore = true;
        self
    }

    /// Handlers starting with an underscore are private and never become commands
    pub fn is_exposed(&self) -> bool {
        !self.handler_name.starts_with('_') && !self.overrides.ignore
    }
}

/// A CLI definition: root behavior, commands and nested sub-CLIs
#[derive(Debug, Clone)]
pub struct Cli {
    pub name: String,
    pub about: Option<String>,
    pub root: Option<CommandDef>,
    pub commands: Vec<CommandDef>,
    pub subclis: Vec<(String, Cli)>,
}

impl Cli {
    pub fn new(name: impl Into<String>) -> Self {
        Cli {
            name: name.into(),
            about: None,
            root: None,
            commands: Vec::new(),
            subclis: Vec::new(),
        }
    }

    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Behavior when no command is selected
    pub fn root(mut self, root: CommandDef) -> Self {
        self.root = Some(root);
        self
    }

    pub fn command(mut self, command: CommandDef) -> Self {
        self.commands.push(command);
        self
    }

    /// Nest `cli` under the command namespace `name`
    pub fn subcli(mut self, name: impl Into<String>, cli: Cli) -> Self {
        self.subclis.push((name.into(), cli));
        self
    }

    /// Compose with another CLI's commands and sub-CLIs
    ///
    /// The root stays ours unless we have none. Name clashes are reported
    /// when the command tree is built.
    pub fn extend(mut self, other: Cli) -> Self {
        if self.root.is_none() {
            self.root = other.root;
        }
        self.commands.extend(other.commands);
        self.subclis.extend(other.subclis);
        self
    }

    /// Apply override records keyed by handler name
    pub fn apply_overrides(
        mut self,
        overrides: impl IntoIterator<Item = (String, Overrides)>,
    ) -> BuildResult<Self> {
        for (handler_name, record) in overrides {
            let target = if handler_name == ROOT_HANDLER {
                self.root.as_mut()
            } else {
                self.commands
                    .iter_mut()
                    .find(|def| def.handler_name == handler_name)
            };

            match target {
                Some(def) => def.overrides.merge(record),
                None => return Err(BuildError::UnknownHandler(handler_name)),
            }
        }
        Ok(self)
    }
}
