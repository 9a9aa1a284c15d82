//! Invocation context handed to handlers
//!
//! The context carries the selected command's arguments plus the global
//! arguments snapshot: every root-level value parsed on the way down to the
//! selected command, keyed by public argument name.

use crate::definition::{FromValue, Value};
use crate::error::{DispatchError, DispatchResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Root-level values visible to every handler of a tree
///
/// Written once at dispatch time and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalArgs {
    values: BTreeMap<String, Value>,
}

impl GlobalArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value; deeper levels shadow shallower ones
    pub fn insert(&mut self, public_name: impl Into<String>, value: Value) {
        self.values.insert(public_name.into(), value);
    }

    pub fn get_value(&self, public_name: &str) -> Option<&Value> {
        self.values.get(public_name)
    }

    /// Typed access by public argument name
    pub fn get<T: FromValue>(&self, public_name: &str) -> DispatchResult<T> {
        let value = self
            .values
            .get(public_name)
            .ok_or_else(|| DispatchError::MissingValue(public_name.to_string()))?;
        T::extract(public_name, value)
    }

    pub fn contains(&self, public_name: &str) -> bool {
        self.values.contains_key(public_name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Everything a handler receives for one dispatch
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Canonical name of the selected command
    pub command: String,

    /// Handler parameter name to value
    pub args: BTreeMap<String, Value>,

    /// Shared global arguments snapshot
    pub globals: Arc<GlobalArgs>,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Invocation {
            command: command.into(),
            args: BTreeMap::new(),
            globals: Arc::new(GlobalArgs::new()),
        }
    }

    /// Set a handler argument
    pub fn with_arg(mut self, param: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(param.into(), value.into());
        self
    }

    /// Set the global arguments snapshot
    pub fn with_globals(mut self, globals: Arc<GlobalArgs>) -> Self {
        self.globals = globals;
        self
    }

    /// Typed access by handler parameter name
    pub fn get<T: FromValue>(&self, param: &str) -> DispatchResult<T> {
        let value = self
            .args
            .get(param)
            .ok_or_else(|| DispatchError::MissingValue(param.to_string()))?;
        T::extract(param, value)
    }

    pub fn value(&self, param: &str) -> Option<&Value> {
        self.args.get(param)
    }

    pub fn globals(&self) -> &GlobalArgs {
        &self.globals
    }
}
