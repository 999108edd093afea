//! CLI command implementations.
//!
//! - `resolve`: User paths to internal paths
//! - `external`: User paths to their external (alias-facing) form
//! - `canonical`: User paths to root-relative identifiers
//! - `clean`: Lexical path cleaning
//! - `watch`: Poll a file or directory and print changes
//! - `validate`: Validate a configuration file
//! - `completions`: Shell completion scripts

pub mod canonical;
pub mod clean;
pub mod completions;
pub mod external;
pub mod resolve;
pub mod validate;
pub mod watch;

pub use canonical::CanonicalCommand;
pub use clean::CleanCommand;
pub use completions::CompletionsCommand;
pub use external::ExternalCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
pub use watch::WatchCommand;
