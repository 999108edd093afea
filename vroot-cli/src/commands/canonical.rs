//! Command to show filesystem-canonical paths.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;

/// Show paths relative to the root with aliases expanded.
#[derive(Args)]
pub struct CanonicalCommand {
    /// User paths to convert
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Print the host path instead of the root-relative identifier
    #[arg(long)]
    pub native: bool,
}

impl CanonicalCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        for path in &self.paths {
            if self.native {
                println!("{}", resolver.to_native_path(path).display());
            } else {
                let internal = resolver.to_internal_path(path);
                println!("{}", resolver.to_filesystem_path(&internal));
            }
        }
        Ok(())
    }
}
