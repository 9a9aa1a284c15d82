//! Cliar - command-line interfaces from declared handler signatures
//!
//! A CLI is declared as a set of handlers, each with an ordered parameter
//! list. Cliar derives the arguments of every command from those parameters
//! (names, types, defaults), assembles a clap parser with subcommands,
//! aliases and nested sub-CLIs, and routes parsed values back to the right
//! handler.
//!
//! ```no_run
//! use cliar::definition::{Cli, CommandDef, Param, Primitive};
//! use cliar::runner::Outcome;
//!
//! let cli = Cli::new("math").command(
//!     CommandDef::new("add", |inv| {
//!         println!("{}", inv.get::<i64>("x")? + inv.get::<i64>("y")?);
//!         Ok(Outcome::Handled)
//!     })
//!     .param(Param::new("x").typed(Primitive::Int))
//!     .param(Param::new("y").typed(Primitive::Int)),
//! );
//!
//! cliar::cli::run(&cli).unwrap();
//! ```

// Public modules
pub mod cli;
pub mod definition;
pub mod error;
pub mod registry;
pub mod runner;

// Re-export commonly used types
pub use cli::App;
pub use definition::{Cli, CommandDef, Param, Primitive, TypeTag, Value};
pub use error::{CliarError, Result};
pub use runner::{Invocation, Outcome};

/// Current version of Cliar
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
