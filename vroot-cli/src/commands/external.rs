//! Command to show the external form of user paths.

use crate::error::CliError;
use crate::utils::{build_resolver, GlobalOptions};
use clap::Args;

/// Show the external form of user paths.
///
/// Paths that pass through an alias are printed relative to the alias key
/// (`pub/x.png`); anything else keeps a leading separator (`/a/b`).
#[derive(Args)]
pub struct ExternalCommand {
    /// User paths to convert
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,
}

impl ExternalCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let resolver = build_resolver(global)?;
        for path in &self.paths {
            let internal = resolver.to_internal_path(path);
            println!("{}", resolver.to_external_path(&internal));
        }
        Ok(())
    }
}
