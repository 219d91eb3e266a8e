//! # Router Mock
//!
//! An in-memory router for unit tests. Build a route table, point the router
//! at an initial path, and assert against the resolved route while driving
//! navigation, with no browser or renderer involved.
//!
//! - **Route Tables** - Strings, definitions, arrays of either, nested children
//! - **Route Matching** - Static segments, `:param` segments, default children
//! - **Named Routes** - Navigate by name with params
//! - **Resolved Routes** - `path`, `query`, `params`, `hash`, `full_path`,
//!   `matched`, `name`, `meta`
//! - **History** - `push`, `replace`, `go`, `back`, `forward`
//! - **Route Entries** - `active` / `activate` per route
//!
//! # Quick Start
//!
//! ```
//! use router_mock::{mock, Location, RouteDefinition};
//!
//! let mut mock = mock(vec![
//!     RouteDefinition::new("/").name("home"),
//!     RouteDefinition::new("/user/:userId").name("user"),
//! ]);
//!
//! mock.router.push(
//!     Location::named("user")
//!         .param("userId", "4")
//!         .query("foo", 1)
//!         .query("bah", 2)
//!         .hash("myid"),
//! );
//!
//! assert_eq!(mock.route.path(), "/user/4");
//! assert_eq!(mock.route.full_path(), "/user/4#myid?foo=1&bah=2");
//! ```
//!
//! # Navigation never fails
//!
//! Paths and names that match nothing resolve to an echo route: the path is
//! kept as given (or `/name` for names) with an empty `matched` chain.
//!
//! ```
//! use router_mock::RouterMock;
//!
//! let mut mock = RouterMock::default();
//! mock.router.push("/users/4");
//! assert_eq!(mock.route.path(), "/users/4");
//! assert!(mock.route.matched().is_empty());
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache for path matching
//! - `serde` (default) - JSON route tables

#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod history;
pub mod location;
pub mod matcher;
pub mod params;
pub mod route;
pub mod state;

// Error handling
pub mod error;

// JSON route tables (optional)
#[cfg(feature = "serde")]
pub mod table;

// Test entry points
mod context;

#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use context::{mock, mock_at, MockRouterBuilder, RouterMock};
pub use error::RouteError;
pub use history::{History, HistoryEntry};
pub use location::{
    format_full_path, normalize_hash, parse_url, ActivateOptions, Location, ParsedUrl, Target,
};
pub use matcher::{build_path, match_routes, RouteMatch, Segment};
pub use params::{QueryParams, RouteParams};
pub use route::{validate_route_path, IntoRoutes, NamedRouteRegistry, RouteDefinition, RouteRef};
pub use state::{CurrentRoute, MockRouter, RouteEntry, RouterConfig};
#[cfg(feature = "serde")]
pub use table::routes_from_json;

use std::collections::HashMap;

/// The result of resolving a location against the route table
///
/// # Example
///
/// ```
/// use router_mock::mock_at;
///
/// let mock = mock_at("/users/:userId", "/users/4#myid?foo=1&bah=2");
/// let route = mock.router.current_route();
///
/// assert_eq!(route.path, "/users/4");
/// assert_eq!(route.hash, "#myid");
/// assert_eq!(route.query.get("foo"), Some(&"1".to_string()));
/// assert_eq!(route.params.get("userId"), Some(&"4".to_string()));
/// assert_eq!(route.matched.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRoute {
    /// Path without query or hash
    pub path: String,
    /// Matched definitions, root first; empty for echo routes
    pub matched: Vec<RouteRef>,
    /// Route parameters
    pub params: RouteParams,
    /// Query parameters
    pub query: QueryParams,
    /// Hash with its leading `#`, or empty
    pub hash: String,
    /// Path, hash and query put back together
    pub full_path: String,
    /// Name of the matched (or requested) route
    pub name: Option<String>,
    /// Metadata of the deepest matched definition
    pub meta: HashMap<String, String>,
}

impl ResolvedRoute {
    /// The deepest matched definition
    pub fn leaf(&self) -> Option<&RouteRef> {
        self.matched.last()
    }

    /// Whether the location matched any route
    pub fn is_matched(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Navigation direction indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// Pushing a new entry or moving forward in history
    Forward,
    /// Moving back in history
    Back,
    /// Overwriting the current entry
    Replace,
}

/// Event returned by every navigation.
///
/// `from` and `to` are full paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    /// The previous full path
    pub from: Option<String>,
    /// The new full path
    pub to: String,
    /// The direction of navigation
    pub direction: NavigationDirection,
}
