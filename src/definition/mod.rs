//! CLI definitions
//!
//! This module holds the declarative side of a CLI: handler signatures,
//! per-command overrides, and composition of command sources.

pub mod parse;
pub mod types;
pub mod value;

// Re-export main types
pub use parse::*;
pub use types::*;
pub use value::*;
