//! Argument values and their type tags

use crate::error::{DispatchError, DispatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Element types an argument value can be parsed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Str,
    Int,
    Float,
    Bool,
    Path,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Str => "string",
            Primitive::Int => "integer",
            Primitive::Float => "float",
            Primitive::Bool => "boolean",
            Primitive::Path => "path",
        }
    }

    /// Whether values of this type may start with a minus sign
    pub fn is_numeric(self) -> bool {
        matches!(self, Primitive::Int | Primitive::Float)
    }
}

/// Declared type of a handler parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// A single value
    Primitive(Primitive),

    /// A sequence, optionally with a declared element type
    Sequence(Option<Primitive>),
}

impl TypeTag {
    /// Sequence of the given element type
    pub fn list(element: Primitive) -> Self {
        TypeTag::Sequence(Some(element))
    }
}

impl From<Primitive> for TypeTag {
    fn from(primitive: Primitive) -> Self {
        TypeTag::Primitive(primitive)
    }
}

/// A parsed argument value or a declared default
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    List(Vec<Value>),
}

impl Value {
    /// Runtime type of a scalar value, `None` for lists
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Value::Str(_) => Some(Primitive::Str),
            Value::Int(_) => Some(Primitive::Int),
            Value::Float(_) => Some(Primitive::Float),
            Value::Bool(_) => Some(Primitive::Bool),
            Value::Path(_) => Some(Primitive::Path),
            Value::List(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.primitive().map(Primitive::name).unwrap_or("list")
    }

    /// Empty strings and empty lists count as empty
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Str(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Convert a scalar to `target`, allowing only lossless widenings
    pub fn coerce(&self, target: Primitive) -> Option<Value> {
        match (self, target) {
            (Value::Int(i), Primitive::Float) => Some(Value::Float(*i as f64)),
            (Value::Str(s), Primitive::Path) => Some(Value::Path(PathBuf::from(s))),
            (value, target) if value.primitive() == Some(target) => Some(value.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Path(p) => write!(f, "{}", p.display()),
            Value::List(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", rendered.join(" "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Typed extraction of a value handed to a handler
pub trait FromValue: Sized {
    /// Human readable type name for error messages
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;

    /// Extract from `value`, naming `name` in the error
    fn extract(name: &str, value: &Value) -> DispatchResult<Self> {
        Self::from_value(value).ok_or_else(|| DispatchError::TypeMismatch {
            name: name.to_string(),
            expected: Self::EXPECTED.to_string(),
        })
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Path(p) => Some(p.display().to_string()),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    const EXPECTED: &'static str = "a path";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(p) => Some(p.clone()),
            Value::Str(s) => Some(PathBuf::from(s)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "a list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}
