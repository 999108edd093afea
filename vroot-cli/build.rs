//! Build script for vroot-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR for inclusion in release builds.
//!
//! Build scripts cannot depend on the crate being built, so the command
//! structure is declared again here.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    Command::new("vroot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve rooted virtual paths and watch files")
        .long_about(
            "Command-line tool for resolving paths inside a rooted virtual path space \
             and polling files for changes",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Root directory of the path space")
                .value_name("PATH")
                .global(true)
                .env("VROOT_ROOT"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read this configuration file instead of discovering vroot.yaml")
                .value_name("FILE")
                .global(true)
                .env("VROOT_CONFIG"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Resolve user paths to internal paths")
                .long_about("Apply the working directory and aliases, then prepend the root"),
            Command::new("external")
                .about("Show the external form of user paths")
                .long_about("Strip the root and reduce alias targets back to their keys"),
            Command::new("canonical")
                .about("Show paths relative to the root, aliases expanded")
                .long_about("Print the root-relative identifier used in watch events"),
            Command::new("clean")
                .about("Lexically clean paths")
                .long_about("Collapse separators and resolve . and .. without touching the disk"),
            Command::new("watch")
                .about("Poll a file or directory and print changes")
                .long_about("Report created, modified and deleted files, one line per event"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a vroot configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("vroot.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
