//! Tree-shaped path matching
//!
//! A route table is matched one level at a time. Each definition consumes a
//! prefix of the remaining path segments, then its children get a chance at
//! the rest:
//!
//! - static segments must be equal
//! - `:name` segments bind any non-empty segment, percent-decoded, into
//!   the params
//! - an empty-path child consumes nothing, so it is picked when the parent
//!   used up the whole path (and it can still pass through to its children)
//!
//! If path remains and no child takes it, the walk backtracks to the next
//! sibling. Siblings are tried in declaration order.

use crate::params::{decode_path_segment, RouteParams};
use crate::route::RouteRef;
use crate::trace_log;
use std::sync::Arc;

/// A single segment in a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Static text that must match exactly
    Static(String),
    /// Parameter that captures a whole segment
    Param(String),
}

impl Segment {
    /// Parse a segment from string
    ///
    /// - `"users"` -> `Static("users")`
    /// - `":id"` -> `Param("id")`
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Static(s.to_string()),
        }
    }

    /// Render this segment with `params` substituted
    ///
    /// Unbound params keep their `:name` form.
    fn render(&self, params: &RouteParams) -> String {
        match self {
            Segment::Static(text) => text.clone(),
            Segment::Param(name) => params
                .get(name)
                .cloned()
                .unwrap_or_else(|| format!(":{}", name)),
        }
    }
}

/// Split a path pattern into segments, ignoring empty pieces
pub fn parse_pattern(path: &str) -> Vec<Segment> {
    path_segments(path).into_iter().map(Segment::parse).collect()
}

/// Split a concrete path on `/`, ignoring empty pieces
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Result of matching a path against the route tree
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    /// Matched definitions, root first
    pub matched: Vec<RouteRef>,
    /// Params bound along the whole chain
    pub params: RouteParams,
}

impl RouteMatch {
    /// The deepest matched definition
    pub fn leaf(&self) -> Option<&RouteRef> {
        self.matched.last()
    }
}

/// Match `path` (no query, no hash) against a route table
///
/// # Example
///
/// ```
/// use router_mock::{match_routes, RouteDefinition};
/// use std::sync::Arc;
///
/// let routes = vec![Arc::new(RouteDefinition::new("/users/:userId"))];
/// let found = match_routes(&routes, "/users/4").unwrap();
///
/// assert_eq!(found.matched.len(), 1);
/// assert_eq!(found.params.get("userId"), Some(&"4".to_string()));
/// assert!(match_routes(&routes, "/posts/4").is_none());
/// ```
pub fn match_routes(routes: &[RouteRef], path: &str) -> Option<RouteMatch> {
    let segments = path_segments(path);
    let mut matched = Vec::new();
    let mut params = RouteParams::new();

    if match_level(routes, &segments, &mut matched, &mut params) {
        trace_log!("'{}' matched {} route(s)", path, matched.len());
        Some(RouteMatch { matched, params })
    } else {
        trace_log!("'{}' matched no route", path);
        None
    }
}

fn match_level(
    routes: &[RouteRef],
    segments: &[&str],
    matched: &mut Vec<RouteRef>,
    params: &mut RouteParams,
) -> bool {
    for route in routes {
        let Some(consumed) = consume(route.segments(), segments) else {
            continue;
        };

        trace_log!(
            "  '{}' consumed {} segment(s), {} left",
            route.path,
            consumed.len,
            segments.len() - consumed.len
        );

        let saved = params.clone();
        for (name, value) in consumed.bindings {
            params.insert(name, value);
        }
        matched.push(Arc::clone(route));

        let rest = &segments[consumed.len..];
        if match_level(&route.children, rest, matched, params) || rest.is_empty() {
            return true;
        }

        matched.pop();
        *params = saved;
    }

    false
}

struct Consumed {
    len: usize,
    bindings: Vec<(String, String)>,
}

/// Match a definition's own segments against the front of `segments`
fn consume(pattern: &[Segment], segments: &[&str]) -> Option<Consumed> {
    if pattern.len() > segments.len() {
        return None;
    }

    let mut bindings = Vec::new();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Static(text) if text == actual => {}
            Segment::Static(_) => return None,
            Segment::Param(name) => {
                bindings.push((name.clone(), decode_path_segment(actual)));
            }
        }
    }

    Some(Consumed {
        len: pattern.len(),
        bindings,
    })
}

/// Build a concrete path for a chain of definitions
///
/// Segments of every definition in the chain are joined; params are
/// substituted and unbound params stay as `:name`.
pub fn build_path(chain: &[RouteRef], params: &RouteParams) -> String {
    let rendered: Vec<String> = chain
        .iter()
        .flat_map(|route| route.segments().iter().map(|s| s.render(params)))
        .collect();

    format!("/{}", rendered.join("/"))
}

/// Full path pattern of a chain, e.g. `/user/:userId/edit`
pub fn full_pattern(chain: &[RouteRef]) -> String {
    build_path(chain, &RouteParams::new())
}

/// Substitute `:name` segments of a concrete path with values from `params`
///
/// Unlike [`build_path`], the path keeps its own shape (leading and
/// trailing slashes).
pub fn substitute_params(path: &str, params: &RouteParams) -> String {
    if params.is_empty() || !path.contains(':') {
        return path.to_string();
    }

    path.split('/')
        .map(|piece| match piece.strip_prefix(':').and_then(|name| params.get(name)) {
            Some(value) => value.as_str(),
            None => piece,
        })
        .collect::<Vec<_>>()
        .join("/")
}
