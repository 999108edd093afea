//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CanonicalCommand, CleanCommand, CompletionsCommand, ExternalCommand, ResolveCommand,
    ValidateCommand, WatchCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for rooted virtual paths and polling file watches.
#[derive(Parser)]
#[command(name = "vroot")]
#[command(version, about = "Resolve rooted virtual paths and watch files", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Root directory of the path space (defaults to the current directory)
    #[arg(long, value_name = "PATH", global = true, env = "VROOT_ROOT")]
    pub root: Option<PathBuf>,

    /// Read this configuration file instead of discovering vroot.yaml
    #[arg(long, value_name = "FILE", global = true, env = "VROOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve user paths to internal paths
    Resolve(ResolveCommand),

    /// Show the external (alias-facing) form of user paths
    External(ExternalCommand),

    /// Show paths relative to the root, aliases expanded
    Canonical(CanonicalCommand),

    /// Lexically clean paths without touching the filesystem
    Clean(CleanCommand),

    /// Poll a file or directory and print changes
    Watch(WatchCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
