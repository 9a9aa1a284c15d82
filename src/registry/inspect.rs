//! Handler inspection
//!
//! Turns a declared parameter list into resolved metadata: the effective type
//! of every parameter and a default already converted to that type.

use crate::definition::{CommandDef, Param, Primitive, TypeTag, Value};
use crate::error::{InspectionError, InspectionResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Receiver name skipped at the head of a parameter list
const RECEIVER: &str = "self";

/// Effective type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Scalar(Primitive),
    Sequence(Primitive),
}

impl ParamType {
    pub fn element(self) -> Primitive {
        match self {
            ParamType::Scalar(p) | ParamType::Sequence(p) => p,
        }
    }

    pub fn is_sequence(self) -> bool {
        matches!(self, ParamType::Sequence(_))
    }

    fn describe(self) -> String {
        match self {
            ParamType::Scalar(p) => p.name().to_string(),
            ParamType::Sequence(p) => format!("list of {}", p.name()),
        }
    }
}

/// Resolved metadata of one handler parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamMeta {
    pub name: String,
    pub ty: ParamType,
    pub default: Option<Value>,
}

impl ParamMeta {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Inspect a command definition's handler signature
pub fn inspect(def: &CommandDef) -> InspectionResult<Vec<ParamMeta>> {
    inspect_params(&def.params)
}

/// Inspect a declared parameter list, in declaration order
pub fn inspect_params(params: &[Param]) -> InspectionResult<Vec<ParamMeta>> {
    let params = match params.split_first() {
        Some((first, rest)) if first.name == RECEIVER => rest,
        _ => params,
    };

    let mut seen = HashSet::new();
    let mut metas = Vec::with_capacity(params.len());

    for param in params {
        if !IDENTIFIER.is_match(&param.name) || param.name == RECEIVER {
            return Err(InspectionError::InvalidParameterName(param.name.clone()));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(InspectionError::DuplicateParameter(param.name.clone()));
        }

        let ty = resolve_type(param);
        let default = match &param.default {
            Some(value) => Some(coerce_default(&param.name, value, ty)?),
            None => None,
        };

        metas.push(ParamMeta {
            name: param.name.clone(),
            ty,
            default,
        });
    }

    Ok(metas)
}

/// Declared type first, then the default's runtime type, then plain string
fn resolve_type(param: &Param) -> ParamType {
    match (param.ty, &param.default) {
        (Some(TypeTag::Primitive(p)), _) => ParamType::Scalar(p),
        (Some(TypeTag::Sequence(Some(p))), _) => ParamType::Sequence(p),
        (Some(TypeTag::Sequence(None)), default) => {
            ParamType::Sequence(default.as_ref().map_or(Primitive::Str, element_of))
        }
        (None, Some(Value::List(items))) => {
            ParamType::Sequence(items.first().and_then(Value::primitive).unwrap_or(Primitive::Str))
        }
        (None, Some(value)) => ParamType::Scalar(value.primitive().unwrap_or(Primitive::Str)),
        (None, None) => ParamType::Scalar(Primitive::Str),
    }
}

fn element_of(default: &Value) -> Primitive {
    match default {
        Value::List(items) => items
            .first()
            .and_then(Value::primitive)
            .unwrap_or(Primitive::Str),
        _ => Primitive::Str,
    }
}

fn coerce_default(name: &str, value: &Value, ty: ParamType) -> InspectionResult<Value> {
    let mismatch = || InspectionError::DefaultTypeMismatch {
        param: name.to_string(),
        expected: ty.describe(),
        found: value.type_name().to_string(),
    };

    match (ty, value) {
        (ParamType::Sequence(element), Value::List(items)) => items
            .iter()
            .map(|item| item.coerce(element))
            .collect::<Option<Vec<_>>>()
            .map(Value::List)
            .ok_or_else(mismatch),
        (ParamType::Scalar(p), value) => value.coerce(p).ok_or_else(mismatch),
        _ => Err(mismatch()),
    }
}
