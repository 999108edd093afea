//! Command to resolve user paths to internal paths.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;

/// Resolve user paths to internal paths.
///
/// Relative paths starting with `.` or `..` resolve against the configured
/// working directory; aliases are expanded and the root is prepended.
#[derive(Args)]
pub struct ResolveCommand {
    /// User paths to resolve
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl ResolveCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        for path in &self.paths {
            println!("{}", resolver.to_internal_path(path));
        }
        Ok(())
    }
}
