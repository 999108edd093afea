//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "vroot";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            print_install_hint(self.shell);
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    eprintln!("# Generating {shell} completion script");
    match shell {
        Shell::Bash => {
            eprintln!("#   vroot completions bash > ~/.local/share/bash-completion/completions/vroot");
            eprintln!("# Or add to ~/.bashrc:");
            eprintln!("#   eval \"$(vroot completions bash)\"");
        }
        Shell::Zsh => {
            eprintln!("#   vroot completions zsh > ~/.zsh/completions/_vroot");
            eprintln!("# Make sure ~/.zsh/completions is in your $fpath");
        }
        Shell::Fish => {
            eprintln!("#   vroot completions fish > ~/.config/fish/completions/vroot.fish");
        }
        Shell::PowerShell => {
            eprintln!("#   vroot completions powershell | Out-String | Invoke-Expression");
        }
        _ => {}
    }
    eprintln!();
}
