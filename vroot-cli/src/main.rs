//! Main entry point for the vroot CLI.
//!
//! Resolves paths inside a rooted virtual path space and watches files:
//! - `resolve`, `external`, `canonical`: Convert between path forms
//! - `clean`: Lexically clean paths
//! - `watch`: Poll for created, modified and deleted files
//! - `validate`: Check a configuration file

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    vroot::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        quiet: cli.quiet,
        root: cli.root,
        config: cli.config,
    };

    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::External(cmd) => cmd.execute(&global),
        cli::Command::Canonical(cmd) => cmd.execute(&global),
        cli::Command::Clean(cmd) => cmd.execute(&global),
        cli::Command::Watch(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
