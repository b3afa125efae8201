//! Command-line interface for devwiz.
//!
//! Two commands share the template registry:
//! - `configure` (the default) - run the interactive wizard and write the
//!   resulting device document
//! - `list` - print the templates available per device category
//!
//! Global options control the template directory and log verbosity; logging
//! goes to stderr through `tracing` so it never interleaves with prompts.

pub mod configure;
pub mod list;

use crate::template::Registry;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Top-level CLI definition.
#[derive(Parser)]
#[command(name = "devwiz", version, about = "Interactive device-configuration wizard")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing device templates
    #[arg(long, global = true, env = "DEVWIZ_TEMPLATES", default_value = "templates")]
    templates: PathBuf,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the interactive configuration wizard (default)
    Configure(configure::ConfigureCommand),
    /// List the templates available per device category
    List(list::ListCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let registry = Registry::load_dir(&self.templates)?;

        match self.command {
            Some(Commands::Configure(cmd)) => cmd.execute(&registry),
            Some(Commands::List(cmd)) => cmd.execute(&registry),
            None => configure::ConfigureCommand::default().execute(&registry),
        }
    }
}

/// Initialize the tracing subscriber from CLI verbosity.
///
/// `RUST_LOG` still wins when set, so targeted filters keep working.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("devwiz={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
