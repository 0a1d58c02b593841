//! fastroute - segment trie HTTP route matcher
//!
//! Given an HTTP method and a path, [`Router::find`] returns the payload
//! registered for the best-matching route pattern together with the path
//! parameters the pattern extracted. It is a building block for servers,
//! not a server: the payload `T` is opaque and returned by reference.
//!
//! # Architecture
//!
//! - Path Segmenter: splits `/a/b/c` into `["a", "b", "c"]`
//! - Route Tree: arena-backed trie with static, parameter and catch-all edges
//! - Static Route Cache: exact path to leaf, for parameter-free patterns
//! - Matcher: recursive search, static > parameter > catch-all
//! - Parameter Extractor: rebuilds `name -> value` from the winning entry
//!
//! # Pattern syntax
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `segment` | literal match |
//! | `:name` | named single-segment parameter |
//! | `:name(regex)` | named parameter constrained by an anchored regex |
//! | `*` | anonymous single-segment parameter (`_0`, `_1`, ...) |
//! | `**` | anonymous catch-all, zero or more remaining segments |
//! | `**:name` | named catch-all binding the remaining path |
//!
//! # Example
//!
//! ```
//! use fastroute::Router;
//!
//! let mut router = Router::new();
//! router.add("GET", "/users/:id", "get_user").unwrap();
//! router.add("GET", "/users/admin", "admin").unwrap();
//! router.add("GET", "/files/**:path", "files").unwrap();
//!
//! let m = router.find("GET", "/users/42").unwrap();
//! assert_eq!(*m.data, "get_user");
//! assert_eq!(m.params.unwrap().get("id"), Some("42"));
//!
//! // Literal routes outrank parameters at the same depth.
//! assert_eq!(*router.find("get", "/users/admin").unwrap().data, "admin");
//!
//! let m = router.find("GET", "/files/a/b/c.txt").unwrap();
//! assert_eq!(m.params.unwrap().get("path"), Some("a/b/c.txt"));
//!
//! assert!(router.find("GET", "/nope").is_none());
//! ```
//!
//! # Concurrency
//!
//! There is no internal locking. `find` takes `&self` and may run from many
//! threads at once; `add` and `remove` take `&mut self`, so a multi-threaded
//! host serializes writers itself (e.g. `RwLock<Router<T>>` or a
//! copy-on-write snapshot swapped behind an `Arc`).

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod matcher;
mod params;
mod router;
mod segment;
mod tree;

#[cfg(feature = "config")]
mod config;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use params::Params;
pub use router::{FindOptions, Match, Router};

#[cfg(feature = "config")]
pub use config::{RouteConfig, RoutesConfig};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use fastroute::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{FindOptions, Match, Params, Router, RouterError, ANY_METHOD};

    #[cfg(feature = "config")]
    pub use crate::{RouteConfig, RoutesConfig};
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Method key that matches any request method.
///
/// An entry registered under `ANY_METHOD` answers every method that has no
/// entry of its own at the same tree position.
pub const ANY_METHOD: &str = "";

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from route registration.
///
/// Lookups never fail: an unmatched path is `None`, and removing an unknown
/// route returns `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// An inline `:name(regex)` constraint failed to compile.
    InvalidPattern {
        /// The full route pattern passed to `add`.
        pattern: String,
        /// The underlying regex error message.
        source: String,
    },
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid route pattern \"{pattern}\": {source}")
            }
        }
    }
}

impl std::error::Error for RouterError {}
