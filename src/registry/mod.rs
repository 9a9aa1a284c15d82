//! Command registration
//!
//! This module turns CLI definitions into the command tree: handler
//! inspection, argument descriptors, and command registration.

pub mod argument;
pub mod command;
pub mod inspect;

// Re-export main types
pub use argument::*;
pub use command::*;
pub use inspect::*;
