//! Rooted virtual path handling.
//!
//! Callers never pass raw operating-system paths around. Instead they address
//! files through a path space anchored at a root directory, and this module
//! converts between four representations of the same location.
//!
//! # Path spaces
//!
//! - **User path**: whatever the caller supplied. It may be absolute
//!   (`/pub/x.png`), relative (`pub/x.png`, `./x.png`), aliased, or a remote
//!   URI (`https://...`).
//! - **Internal path**: root prepended, aliases expanded, cleaned. This is the
//!   only form handed to native filesystem calls.
//! - **External path**: root stripped, alias targets reduced back to their
//!   keys. Suitable for exposing to untrusted callers or URLs.
//! - **Filesystem path**: root stripped, aliases expanded, no leading
//!   separator. A stable identifier that does not depend on where the root
//!   is mounted.
//!
//! Remote paths (anything containing `://`) pass through every conversion
//! untouched.
//!
//! # Examples
//!
//! ```
//! use vroot::path::{clean_path, make_path};
//!
//! assert_eq!(clean_path("/srv/./site/../www/"), "/srv/www");
//! assert_eq!(make_path(&["/srv/www/", "index.html"]), "/srv/www/index.html");
//! ```
//!
//! ```no_run
//! use vroot::PathResolver;
//!
//! let resolver = PathResolver::new("/srv/site")
//!     .unwrap()
//!     .with_alias("pub", "storage/public");
//!
//! let internal = resolver.to_internal_path("pub/logo.png");
//! assert_eq!(internal, "/srv/site/storage/public/logo.png");
//! assert_eq!(resolver.to_external_path(&internal), "pub/logo.png");
//! ```

mod alias;
pub mod canonicalize;
mod clean;
pub mod normalize;
pub mod resolver;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use alias::{Alias, AliasTable};
pub use clean::{clean_path, is_remote, make_path, SEPARATOR};
pub use resolver::PathResolver;
