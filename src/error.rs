//! Error types for Cliar

use std::io;
use thiserror::Error;

/// Result type alias for Cliar operations
pub type Result<T> = std::result::Result<T, CliarError>;

/// Main error type for Cliar
#[derive(Error, Debug)]
pub enum CliarError {
    /// Errors raised while building the command tree or the parser
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Command-line parsing errors reported by clap
    #[error(transparent)]
    Parse(#[from] clap::Error),

    /// Errors while routing parsed values to a handler
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A handler returned an error
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing or rendering errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors in a CLI definition, detected before any input is read
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Command name cannot be empty")]
    EmptyCommandName,

    #[error("Argument '{argument}' is defined more than once in command '{command}'")]
    DuplicateArgument { command: String, argument: String },

    #[error("Command '{0}' is defined more than once")]
    DuplicateCommand(String),

    #[error("Boolean parameter '{param}' of command '{command}' cannot default to true")]
    TrueBooleanDefault { command: String, param: String },

    #[error("Variadic positional '{argument}' of command '{command}' must be the last positional")]
    VariadicPositionalNotLast { command: String, argument: String },

    #[error("Invalid argument name '{name}' in command '{command}'")]
    InvalidArgumentName { command: String, name: String },

    #[error("Handler '{0}' is not defined")]
    UnknownHandler(String),

    #[error("Inspection failed: {0}")]
    Inspection(#[from] InspectionError),
}

/// Errors while reading a handler's declared parameters
#[derive(Error, Debug)]
pub enum InspectionError {
    #[error("Invalid parameter name '{0}'")]
    InvalidParameterName(String),

    #[error("Parameter '{0}' is declared more than once")]
    DuplicateParameter(String),

    #[error("Default of parameter '{param}' is {found}, expected {expected}")]
    DefaultTypeMismatch {
        param: String,
        expected: String,
        found: String,
    },
}

/// Errors while resolving parsed values into handler arguments
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Command '{0}' is not registered")]
    UnknownCommand(String),

    #[error("No value for argument '{0}'")]
    MissingValue(String),

    #[error("Argument '{name}' is not {expected}")]
    TypeMismatch { name: String, expected: String },

    #[error("Cannot read argument '{name}': {error}")]
    Matches { name: String, error: String },
}

/// Specialized result type for build operations
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Specialized result type for inspection
pub type InspectionResult<T> = std::result::Result<T, InspectionError>;

/// Specialized result type for dispatch operations
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

/// Whether the error belongs to the CLI author (a broken definition)
/// rather than to the end user's input
pub fn is_definition_error(err: &CliarError) -> bool {
    matches!(err, CliarError::Build(_))
}
