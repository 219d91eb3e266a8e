//! Route definitions and the named route registry

use crate::error::RouteError;
use crate::matcher::{build_path, parse_pattern, Segment};
use crate::params::RouteParams;
use crate::warn_log;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared route handle.
///
/// Resolved routes refer back to the definitions they matched; identity
/// (`Arc::ptr_eq`) is what makes a route "active".
pub type RouteRef = Arc<RouteDefinition>;

// ============================================================================
// NamedRouteRegistry
// ============================================================================

/// Registry for named routes
///
/// Maps every route name in the tree to its ancestor chain (root first,
/// named route last).
#[derive(Clone, Debug, Default)]
pub struct NamedRouteRegistry {
    routes: HashMap<String, Vec<RouteRef>>,
}

impl NamedRouteRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `route` and all of its descendants
    ///
    /// Names must be unique across the tree. A duplicate keeps the first
    /// registration and is reported at warn level.
    pub fn register_tree(&mut self, route: &RouteRef) {
        let mut chain = Vec::new();
        self.register_with_ancestors(route, &mut chain);
    }

    fn register_with_ancestors(&mut self, route: &RouteRef, chain: &mut Vec<RouteRef>) {
        chain.push(Arc::clone(route));

        if let Some(name) = &route.name {
            if self.routes.contains_key(name) {
                warn_log!("Duplicate route name '{}', keeping the first one", name);
            } else {
                self.routes.insert(name.clone(), chain.clone());
            }
        }

        for child in &route.children {
            self.register_with_ancestors(child, chain);
        }

        chain.pop();
    }

    /// Get the ancestor chain of a named route
    pub fn get(&self, name: &str) -> Option<&[RouteRef]> {
        self.routes.get(name).map(|chain| chain.as_slice())
    }

    /// Check if a route name exists
    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Generate the path for a named route with parameters
    ///
    /// # Example
    ///
    /// ```
    /// use router_mock::{NamedRouteRegistry, RouteDefinition, RouteParams};
    /// use std::sync::Arc;
    ///
    /// let user = Arc::new(
    ///     RouteDefinition::new("/user")
    ///         .child(RouteDefinition::new(":userId").name("child")),
    /// );
    /// let mut registry = NamedRouteRegistry::new();
    /// registry.register_tree(&user);
    ///
    /// let params: RouteParams = [("userId", "4")].into_iter().collect();
    /// assert_eq!(registry.url_for("child", &params), Some("/user/4".to_string()));
    /// ```
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        self.get(name).map(|chain| build_path(chain, params))
    }

    /// Clear all registered routes
    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// Get number of registered names
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ============================================================================
// Route Validation
// ============================================================================

/// Validate a route path pattern
///
/// # Validation Rules
///
/// - Path can be empty (default child)
/// - Path may be absolute (`/users`) or relative (`add`, `:id`)
/// - No consecutive slashes (`//`)
/// - Parameter names must be non-empty and alphanumeric/underscore
/// - No duplicate parameter names
pub fn validate_route_path(path: &str) -> Result<(), RouteError> {
    if path.is_empty() {
        return Ok(());
    }

    if path.contains("//") {
        return Err(RouteError::invalid_path(
            path,
            "Route path cannot contain consecutive slashes",
        ));
    }

    let mut param_names = HashSet::new();
    for segment in path.split('/') {
        if let Some(param) = segment.strip_prefix(':') {
            if param.is_empty() {
                return Err(RouteError::invalid_path(
                    path,
                    "Route parameter name cannot be empty",
                ));
            }

            if !param.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(RouteError::invalid_path(
                    path,
                    format!(
                        "Route parameter '{}' must contain only alphanumeric characters and underscores",
                        param
                    ),
                ));
            }

            if !param_names.insert(param) {
                return Err(RouteError::invalid_path(
                    path,
                    format!("Duplicate route parameter: '{}'", param),
                ));
            }
        }
    }

    Ok(())
}

// ============================================================================
// RouteDefinition
// ============================================================================

/// A node of the route tree
///
/// `path` is this node's own segment: `"/users"` at the top level, `"add"`
/// or `":userId"` for a child, `""` for a default child. A node's full path
/// is the join of its ancestors' segments with its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDefinition {
    /// Path pattern of this node only
    pub path: String,
    /// Route name, unique across the tree
    pub name: Option<String>,
    /// Route metadata
    pub meta: HashMap<String, String>,
    /// Child routes in declaration order
    pub children: Vec<RouteRef>,
    segments: Vec<Segment>,
}

impl RouteDefinition {
    /// Create a route definition with path validation
    ///
    /// # Panics
    ///
    /// Panics if the path is invalid. Use `try_new` for non-panicking validation.
    pub fn new(path: impl Into<String>) -> Self {
        match Self::try_new(path) {
            Ok(route) => route,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a route definition, returning an error for invalid paths
    pub fn try_new(path: impl Into<String>) -> Result<Self, RouteError> {
        let path = path.into();
        validate_route_path(&path)?;
        Ok(Self {
            segments: parse_pattern(&path),
            path,
            name: None,
            meta: HashMap::new(),
            children: Vec::new(),
        })
    }

    /// Set route name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add metadata
    ///
    /// # Example
    ///
    /// ```
    /// use router_mock::RouteDefinition;
    ///
    /// let route = RouteDefinition::new("/users/add").meta("title", "some title");
    /// assert_eq!(route.meta.get("title").map(String::as_str), Some("some title"));
    /// ```
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Append child routes
    pub fn children(mut self, children: impl IntoRoutes) -> Self {
        self.children
            .extend(children.into_routes().into_iter().map(Arc::new));
        self
    }

    /// Append a single child route
    pub fn child(mut self, child: impl Into<RouteDefinition>) -> Self {
        self.children.push(Arc::new(child.into()));
        self
    }

    /// Parsed segments of this node's own path
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this is a default child (empty path)
    pub fn is_default_child(&self) -> bool {
        self.segments.is_empty() && !self.path.starts_with('/')
    }

    /// Get all child routes
    pub fn get_children(&self) -> &[RouteRef] {
        &self.children
    }
}

impl From<&str> for RouteDefinition {
    fn from(path: &str) -> Self {
        RouteDefinition::new(path)
    }
}

impl From<String> for RouteDefinition {
    fn from(path: String) -> Self {
        RouteDefinition::new(path)
    }
}

// ============================================================================
// Route table input
// ============================================================================

/// Anything that can stand in for a route table
///
/// A single path string, a single definition, or a list of either:
///
/// ```
/// use router_mock::{IntoRoutes, RouteDefinition};
///
/// assert_eq!("/users".into_routes().len(), 1);
/// assert_eq!(vec!["/users", "/users/add"].into_routes().len(), 2);
/// assert_eq!(
///     [RouteDefinition::new("/"), RouteDefinition::new("/users")]
///         .into_routes()
///         .len(),
///     2
/// );
/// ```
pub trait IntoRoutes {
    /// Convert into top-level route definitions
    fn into_routes(self) -> Vec<RouteDefinition>;
}

impl IntoRoutes for &str {
    fn into_routes(self) -> Vec<RouteDefinition> {
        vec![self.into()]
    }
}

impl IntoRoutes for String {
    fn into_routes(self) -> Vec<RouteDefinition> {
        vec![self.into()]
    }
}

impl IntoRoutes for RouteDefinition {
    fn into_routes(self) -> Vec<RouteDefinition> {
        vec![self]
    }
}

impl<T: Into<RouteDefinition>> IntoRoutes for Vec<T> {
    fn into_routes(self) -> Vec<RouteDefinition> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<RouteDefinition>, const N: usize> IntoRoutes for [T; N] {
    fn into_routes(self) -> Vec<RouteDefinition> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<RouteDefinition> + Clone> IntoRoutes for &[T] {
    fn into_routes(self) -> Vec<RouteDefinition> {
        self.iter().cloned().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_tree() -> RouteRef {
        Arc::new(
            RouteDefinition::new("/user").name("parent").children([
                RouteDefinition::new("").name("defaultChild"),
                RouteDefinition::new(":userId")
                    .name("child")
                    .child(RouteDefinition::new("edit").name("editUser")),
            ]),
        )
    }

    // NamedRouteRegistry tests

    #[test]
    fn test_registry_registers_whole_tree() {
        let mut registry = NamedRouteRegistry::new();
        registry.register_tree(&user_tree());

        assert_eq!(registry.len(), 4);
        assert!(registry.contains("parent"));
        assert!(registry.contains("editUser"));
        assert!(!registry.contains("unknown"));
    }

    #[test]
    fn test_registry_chain() {
        let mut registry = NamedRouteRegistry::new();
        registry.register_tree(&user_tree());

        let chain = registry.get("editUser").unwrap();
        let paths: Vec<&str> = chain.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/user", ":userId", "edit"]);
    }

    #[test]
    fn test_url_for_with_params() {
        let mut registry = NamedRouteRegistry::new();
        registry.register_tree(&user_tree());

        let params: RouteParams = [("userId", "4")].into_iter().collect();
        assert_eq!(
            registry.url_for("editUser", &params),
            Some("/user/4/edit".to_string())
        );
        assert_eq!(
            registry.url_for("defaultChild", &params),
            Some("/user".to_string())
        );
        assert_eq!(registry.url_for("unknown", &params), None);
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut registry = NamedRouteRegistry::new();
        registry.register_tree(&Arc::new(RouteDefinition::new("/a").name("dup")));
        registry.register_tree(&Arc::new(RouteDefinition::new("/b").name("dup")));

        let chain = registry.get("dup").unwrap();
        assert_eq!(chain[0].path, "/a");
    }

    #[test]
    fn test_registry_clear() {
        let mut registry = NamedRouteRegistry::new();
        registry.register_tree(&user_tree());
        registry.clear();
        assert!(registry.is_empty());
    }

    // RouteDefinition tests

    #[test]
    fn test_builder() {
        let route = RouteDefinition::new("/users/add")
            .name("addUser")
            .meta("title", "some title")
            .children([":many"]);

        assert_eq!(route.path, "/users/add");
        assert_eq!(route.name.as_deref(), Some("addUser"));
        assert_eq!(route.meta.get("title"), Some(&"some title".to_string()));
        assert_eq!(route.children.len(), 1);
        assert_eq!(route.children[0].path, ":many");
        assert_eq!(route.segments().len(), 2);
    }

    #[test]
    fn test_default_child() {
        assert!(RouteDefinition::new("").is_default_child());
        assert!(!RouteDefinition::new("/").is_default_child());
        assert!(!RouteDefinition::new("edit").is_default_child());
    }

    #[test]
    fn test_into_routes_forms() {
        assert_eq!("/users".into_routes()[0].path, "/users");
        assert_eq!("/users".to_string().into_routes().len(), 1);
        assert_eq!(RouteDefinition::new("/x").into_routes().len(), 1);
        assert_eq!(vec!["/users", "/users/add"].into_routes().len(), 2);

        let table = [RouteDefinition::new("/a"), RouteDefinition::new("/b")];
        assert_eq!(table.as_slice().into_routes().len(), 2);
    }

    // Validation tests

    #[test]
    fn test_validate_valid_paths() {
        assert!(validate_route_path("/").is_ok());
        assert!(validate_route_path("/users").is_ok());
        assert!(validate_route_path("/users/:userId").is_ok());
        assert!(validate_route_path("/posts/:post_id/comments/:commentId").is_ok());
        assert!(validate_route_path("add").is_ok());
        assert!(validate_route_path("").is_ok());
        assert!(validate_route_path("/users/").is_ok());
    }

    #[test]
    fn test_validate_consecutive_slashes() {
        let err = validate_route_path("/users//profile").unwrap_err();
        assert!(err.to_string().contains("consecutive slashes"));
    }

    #[test]
    fn test_validate_empty_parameter() {
        let err = validate_route_path("/users/:").unwrap_err();
        assert!(err.to_string().contains("parameter name cannot be empty"));
    }

    #[test]
    fn test_validate_invalid_parameter_name() {
        let err = validate_route_path("/users/:user-id").unwrap_err();
        assert!(err.to_string().contains("alphanumeric"));
    }

    #[test]
    fn test_validate_duplicate_parameters() {
        let err = validate_route_path("/users/:id/posts/:id").unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_try_new() {
        assert!(RouteDefinition::try_new("/users/:id").is_ok());
        assert!(RouteDefinition::try_new("/users//profile").is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid route path")]
    fn test_new_panics_on_invalid() {
        let _ = RouteDefinition::new("/users//profile");
    }
}
