//! Main CLI application

use crate::cli::assemble;
use crate::definition::Cli;
use crate::error::{is_definition_error, CliarError, Result};
use crate::registry::{register, CommandTree};
use crate::runner::{dispatch, Dispatched, Outcome};
use clap::Command;
use clap_complete::Shell;
use colored::Colorize;
use std::ffi::OsString;
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// CLI application
pub struct App {
    /// The registered command tree
    tree: CommandTree,
    /// The clap command assembled from the tree
    command: Command,
}

impl App {
    /// Build the command tree and the parser for a CLI definition
    pub fn new(cli: &Cli) -> Result<Self> {
        let tree = register(cli)?;
        let mut command = assemble(&tree);
        command.build();

        Ok(App { tree, command })
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Run with the process arguments
    ///
    /// Parse failures print clap's diagnostic and exit the process.
    pub fn run(self) -> Result<()> {
        match self.run_from(std::env::args_os()) {
            Err(CliarError::Parse(err)) => err.exit(),
            Err(err) => Err(err),
            Ok(dispatched) => self.finish(&dispatched),
        }
    }

    /// Parse `args` and dispatch to the selected handler
    ///
    /// `args` includes the program name. Help requests and parse failures
    /// come back as [`CliarError::Parse`].
    pub fn run_from<I, T>(&self, args: I) -> Result<Dispatched>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(args)?;
        dispatch(&self.tree, &matches)
    }

    /// Print usage when the handler asked for it
    fn finish(&self, dispatched: &Dispatched) -> Result<()> {
        if dispatched.outcome == Outcome::ShowHelp {
            let help = self.render_help(&dispatched.level);
            let mut stdout = std::io::stdout();
            write!(stdout, "{}", help)?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Help text of the CLI level at `level` (sub-CLI names from the top)
    pub fn render_help(&self, level: &[String]) -> String {
        let mut command = &self.command;
        for name in level {
            match command.find_subcommand(name) {
                Some(sub) => command = sub,
                None => break,
            }
        }
        command.clone().render_help().to_string()
    }

    /// YAML rendering of the registered command tree
    pub fn describe(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.tree)?)
    }

    /// Write a shell completion script for the assembled parser
    pub fn write_completions(&self, shell: Shell, out: &mut dyn Write) {
        let mut command = self.command.clone();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, out);
    }
}

/// Install the stderr log subscriber, filtered by `RUST_LOG`
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed by the embedding program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print an error the way the binaries report fatal failures
pub fn report_error(err: &CliarError) {
    let label = if is_definition_error(err) {
        "Invalid CLI definition:"
    } else {
        "Error:"
    };
    eprintln!("{} {}", label.red().bold(), err);
}

/// Build and run a CLI definition with the process arguments
pub fn run(cli: &Cli) -> Result<()> {
    App::new(cli)?.run()
}
