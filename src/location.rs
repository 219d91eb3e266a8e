//! Navigation targets and URL parsing
//!
//! A [`Location`] is what gets passed to `push`, `replace` and `resolve`:
//! either a path string (which may carry its own `?query` and `#hash`) or a
//! route name, plus optional params, query and hash.

use crate::params::{QueryParams, RouteParams};
use std::fmt::Display;

/// A location string split into its parts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUrl {
    /// Path without query or hash
    pub path: String,
    /// Parsed query
    pub query: QueryParams,
    /// Hash including the leading `#`, or empty
    pub hash: String,
}

/// Split a location string into path, query and hash
///
/// The path ends at the first `?` or `#`. Whichever comes first, the other
/// may follow it, so both `/a?x=1#top` and `/a#top?x=1` are understood.
///
/// ```
/// use router_mock::parse_url;
///
/// let url = parse_url("/users/4#myid?foo=1&bah=2");
/// assert_eq!(url.path, "/users/4");
/// assert_eq!(url.hash, "#myid");
/// assert_eq!(url.query.get("bah"), Some(&"2".to_string()));
/// ```
pub fn parse_url(url: &str) -> ParsedUrl {
    let Some(split) = url.find(|c| c == '?' || c == '#') else {
        return ParsedUrl {
            path: url.to_string(),
            ..ParsedUrl::default()
        };
    };

    let (path, rest) = url.split_at(split);
    let (query, hash) = if let Some(after_hash) = rest.strip_prefix('#') {
        match after_hash.split_once('?') {
            Some((hash, query)) => (query, hash),
            None => ("", after_hash),
        }
    } else {
        let after_question = &rest[1..];
        match after_question.split_once('#') {
            Some((query, hash)) => (query, hash),
            None => (after_question, ""),
        }
    };

    ParsedUrl {
        path: path.to_string(),
        query: QueryParams::from_query_string(query),
        hash: normalize_hash(hash),
    }
}

/// Give a non-empty hash its leading `#`; a bare `#` is no hash
pub fn normalize_hash(hash: &str) -> String {
    if hash.is_empty() || hash == "#" {
        String::new()
    } else if hash.starts_with('#') {
        hash.to_string()
    } else {
        format!("#{}", hash)
    }
}

/// Rebuild a full path: path, then hash, then `?query`
///
/// ```
/// use router_mock::{format_full_path, QueryParams};
///
/// let query = QueryParams::from_query_string("foo=1&bah=2");
/// assert_eq!(format_full_path("/user/4", "#myid", &query), "/user/4#myid?foo=1&bah=2");
/// assert_eq!(format_full_path("/users", "", &QueryParams::new()), "/users");
/// ```
pub fn format_full_path(path: &str, hash: &str, query: &QueryParams) -> String {
    let mut full = String::with_capacity(path.len() + hash.len());
    full.push_str(path);
    full.push_str(hash);
    if !query.is_empty() {
        full.push('?');
        full.push_str(&query.to_query_string());
    }
    full
}

/// What a [`Location`] points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A path, possibly with `:param` segments, query and hash
    Path(String),
    /// A route name
    Name(String),
}

/// A navigation target
///
/// # Example
///
/// ```
/// use router_mock::Location;
///
/// let by_path = Location::path("/user/:userId")
///     .param("userId", "4")
///     .query("foo", 1)
///     .hash("myid");
///
/// let by_name = Location::named("user").param("userId", "4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path or name
    pub target: Target,
    /// Params substituted into the path
    pub params: RouteParams,
    /// Query merged over any query in the path string
    pub query: QueryParams,
    /// Hash, with or without the leading `#`
    pub hash: String,
}

impl Location {
    fn new(target: Target) -> Self {
        Self {
            target,
            params: RouteParams::new(),
            query: QueryParams::new(),
            hash: String::new(),
        }
    }

    /// Target a path
    pub fn path(path: impl Into<String>) -> Self {
        Self::new(Target::Path(path.into()))
    }

    /// Target a named route
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Target::Name(name.into()))
    }

    /// Add a route parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Replace all route parameters
    pub fn params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Replace the whole query
    pub fn query_params(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Set the hash
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Location::path(path)
    }
}

impl From<String> for Location {
    fn from(path: String) -> Self {
        Location::path(path)
    }
}

impl From<&String> for Location {
    fn from(path: &String) -> Self {
        Location::path(path.as_str())
    }
}

/// Params, query and hash for activating a route entry
///
/// ```
/// use router_mock::ActivateOptions;
///
/// let options = ActivateOptions::new().param("userId", "4").query("foo", "bah");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateOptions {
    params: RouteParams,
    query: QueryParams,
    hash: String,
}

impl ActivateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Add a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.query.insert(key, value);
        self
    }

    /// Set the hash
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Turn into a location for the given path pattern
    pub fn into_location(self, pattern: impl Into<String>) -> Location {
        Location::path(pattern)
            .params(self.params)
            .query_params(self.query)
            .hash(self.hash)
    }
}
