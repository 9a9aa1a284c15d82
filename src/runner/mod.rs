//! Command dispatch
//!
//! This module routes parsed input to handlers: handler types, the
//! invocation context, and resolution of the selected command.

pub mod context;
pub mod dispatch;
pub mod handler;

// Re-export main types
pub use context::*;
pub use dispatch::*;
pub use handler::*;
