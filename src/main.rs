//! devwiz CLI entry point
//!
//! This is the main executable for the device-configuration wizard.
//! It handles command-line argument parsing, error display, and command
//! execution. The interesting logic lives in the library crate:
//! - `configure` - run the interactive wizard and write the device document
//! - `list` - list templates available for a device category

use anyhow::Result;
use clap::Parser;
use devwiz::cli;
use devwiz::core::error::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
