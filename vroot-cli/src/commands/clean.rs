//! Command to lexically clean paths.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use vroot::clean_path;

/// Lexically clean paths.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. No configuration is read and the
/// filesystem is never consulted.
#[derive(Args)]
pub struct CleanCommand {
    /// Paths to clean
    #[arg(value_name = "PATH", required = true, allow_hyphen_values = true)]
    pub paths: Vec<String>,
}

impl CleanCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        for path in &self.paths {
            println!("{}", clean_path(path));
        }
        Ok(())
    }
}
