//! CLI interface and argument parsing
//!
//! This module assembles the clap parser from a command tree and runs it,
//! including help output and shell completion.

pub mod app;
pub mod assemble;

// Re-export main types
pub use app::*;
pub use assemble::*;
