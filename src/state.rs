//! Router state: route table, resolution, history and the current route

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, RouteCache};
use crate::history::History;
use crate::location::{format_full_path, normalize_hash, parse_url, ActivateOptions, Location, Target};
use crate::matcher::{self, full_pattern, substitute_params, RouteMatch};
use crate::params::{QueryParams, RouteParams};
use crate::route::{IntoRoutes, NamedRouteRegistry, RouteDefinition, RouteRef};
use crate::{debug_log, info_log, trace_log, warn_log, ResolvedRoute, RouteChangeEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// CurrentRoute
// ============================================================================

/// Live handle to the router's current route
///
/// Every navigation overwrites the shared value in place, so all clones of
/// the handle see the new route. Use [`MockRouter::current_route`] or
/// [`CurrentRoute::snapshot`] for a detached copy.
#[derive(Debug, Clone, Default)]
pub struct CurrentRoute {
    inner: Rc<RefCell<ResolvedRoute>>,
}

impl CurrentRoute {
    pub(crate) fn set(&self, route: ResolvedRoute) {
        *self.inner.borrow_mut() = route;
    }

    /// Run `f` against the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&ResolvedRoute) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Detached copy of the current value
    pub fn snapshot(&self) -> ResolvedRoute {
        self.inner.borrow().clone()
    }

    /// Path without query or hash
    pub fn path(&self) -> String {
        self.with(|r| r.path.clone())
    }

    /// Path, hash and query as one string
    pub fn full_path(&self) -> String {
        self.with(|r| r.full_path.clone())
    }

    /// Hash with its leading `#`, or empty
    pub fn hash(&self) -> String {
        self.with(|r| r.hash.clone())
    }

    /// Route name, if any
    pub fn name(&self) -> Option<String> {
        self.with(|r| r.name.clone())
    }

    /// All route parameters
    pub fn params(&self) -> RouteParams {
        self.with(|r| r.params.clone())
    }

    /// All query parameters
    pub fn query(&self) -> QueryParams {
        self.with(|r| r.query.clone())
    }

    /// Metadata of the deepest matched route
    pub fn meta(&self) -> HashMap<String, String> {
        self.with(|r| r.meta.clone())
    }

    /// Matched definitions, root first
    pub fn matched(&self) -> Vec<RouteRef> {
        self.with(|r| r.matched.clone())
    }

    /// Single route parameter
    pub fn param(&self, key: &str) -> Option<String> {
        self.with(|r| r.params.get(key).cloned())
    }

    /// First value of a query parameter
    pub fn query_value(&self, key: &str) -> Option<String> {
        self.with(|r| r.query.get(key).cloned())
    }

    /// Single meta entry
    pub fn meta_value(&self, key: &str) -> Option<String> {
        self.with(|r| r.meta.get(key).cloned())
    }

    /// Whether both handles share the same underlying route
    pub fn ptr_eq(a: &CurrentRoute, b: &CurrentRoute) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl PartialEq<ResolvedRoute> for CurrentRoute {
    fn eq(&self, other: &ResolvedRoute) -> bool {
        self.with(|r| r == other)
    }
}

impl PartialEq<CurrentRoute> for ResolvedRoute {
    fn eq(&self, other: &CurrentRoute) -> bool {
        other == self
    }
}

// ============================================================================
// RouterConfig
// ============================================================================

/// Runtime settings for a [`MockRouter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Maximum number of history entries (0 = unlimited)
    pub history_limit: usize,
    /// Capacity of the path match cache
    pub cache_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            history_limit: History::DEFAULT_MAX_SIZE,
            cache_capacity: 256,
        }
    }
}

// ============================================================================
// MockRouter
// ============================================================================

/// In-memory router
///
/// Holds the route table, the navigation history and the live
/// [`CurrentRoute`] handle. Navigation never fails: targets that match
/// nothing resolve to an echo route.
#[derive(Debug)]
pub struct MockRouter {
    routes: Vec<RouteRef>,
    names: NamedRouteRegistry,
    history: History,
    current: CurrentRoute,
    #[cfg(feature = "cache")]
    cache: RouteCache,
}

impl MockRouter {
    /// Build a router and resolve its first route
    ///
    /// Without an explicit `initial` location the path of the first
    /// top-level route is used, or `/` for an empty table.
    pub fn new(routes: impl IntoRoutes, initial: Option<Location>, config: &RouterConfig) -> Self {
        let mut router = Self {
            routes: Vec::new(),
            names: NamedRouteRegistry::new(),
            history: History::with_max_size(ResolvedRoute::default(), config.history_limit),
            current: CurrentRoute::default(),
            #[cfg(feature = "cache")]
            cache: RouteCache::with_capacity(config.cache_capacity),
        };
        router.add_routes(routes);

        let initial = initial.unwrap_or_else(|| {
            let path = router
                .routes
                .first()
                .map_or_else(|| "/".to_string(), |first| full_pattern(std::slice::from_ref(first)));
            Location::path(path)
        });

        let route = router.resolve(initial);
        info_log!(
            "Mock router ready with {} route(s) at '{}'",
            router.routes.len(),
            route.full_path
        );
        router.history = History::with_max_size(route.clone(), config.history_limit);
        router.current.set(route);
        router
    }

    /// Top-level route definitions
    pub fn routes(&self) -> &[RouteRef] {
        &self.routes
    }

    /// Append top-level routes
    ///
    /// The current route is not re-resolved.
    pub fn add_routes(&mut self, routes: impl IntoRoutes) {
        for definition in routes.into_routes() {
            let route = Arc::new(definition);
            trace_log!("Adding route '{}'", route.path);
            self.names.register_tree(&route);
            self.routes.push(route);
        }

        #[cfg(feature = "cache")]
        self.cache.clear();
    }

    /// Live handle to the current route
    pub fn current_handle(&self) -> CurrentRoute {
        self.current.clone()
    }

    /// Fresh snapshot of the current route
    pub fn current_route(&self) -> ResolvedRoute {
        self.current.snapshot()
    }

    /// Navigation history
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Path for a named route, `None` if the name is unknown
    pub fn url_for(&self, name: &str, params: &RouteParams) -> Option<String> {
        self.names.url_for(name, params)
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }

    // ------------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------------

    /// Resolve a target without navigating
    pub fn resolve(&mut self, target: impl Into<Location>) -> ResolvedRoute {
        let Location {
            target,
            params,
            query,
            hash,
        } = target.into();

        match target {
            Target::Path(raw) => self.resolve_path(&raw, params, &query, &hash),
            Target::Name(name) => self.resolve_name(name, params, query, &hash),
        }
    }

    fn resolve_path(
        &mut self,
        raw: &str,
        params: RouteParams,
        explicit_query: &QueryParams,
        explicit_hash: &str,
    ) -> ResolvedRoute {
        let url = parse_url(raw);
        let path = substitute_params(&url.path, &params);

        let mut query = url.query;
        query.overlay(explicit_query);

        let hash = if explicit_hash.is_empty() {
            url.hash
        } else {
            normalize_hash(explicit_hash)
        };

        match self.match_path(&path) {
            Some(RouteMatch {
                matched,
                params: bound,
            }) => {
                let mut merged = params;
                merged.merge(&bound);
                build_resolved(path, matched, merged, query, hash, None)
            }
            None => {
                warn_log!("No route matches '{}', echoing the path", path);
                build_resolved(path, Vec::new(), params, query, hash, None)
            }
        }
    }

    fn resolve_name(
        &mut self,
        name: String,
        params: RouteParams,
        query: QueryParams,
        explicit_hash: &str,
    ) -> ResolvedRoute {
        let hash = normalize_hash(explicit_hash);

        if let Some(chain) = self.names.get(&name) {
            let path = matcher::build_path(chain, &params);
            let matched = chain.to_vec();
            return build_resolved(path, matched, params, query, hash, Some(name));
        }

        warn_log!("No route named '{}', echoing it as a path", name);
        let path = format!("/{}", name.trim_start_matches('/'));
        build_resolved(path, Vec::new(), params, query, hash, Some(name))
    }

    fn match_path(&mut self, path: &str) -> Option<RouteMatch> {
        #[cfg(feature = "cache")]
        if let Some(cached) = self.cache.get(path) {
            return cached;
        }

        let result = matcher::match_routes(&self.routes, path);

        #[cfg(feature = "cache")]
        self.cache.insert(path.to_string(), result.clone());

        result
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Navigate to a new location, dropping any forward history
    pub fn push(&mut self, target: impl Into<Location>) -> RouteChangeEvent {
        let route = self.resolve(target);
        debug_log!("push '{}'", route.full_path);

        let event = self.history.push(route.clone());
        self.current.set(route);
        event
    }

    /// Replace the current history entry
    pub fn replace(&mut self, target: impl Into<Location>) -> RouteChangeEvent {
        let route = self.resolve(target);
        debug_log!("replace '{}'", route.full_path);

        let event = self.history.replace(route.clone());
        self.current.set(route);
        event
    }

    /// Move through history by `delta` entries, clamped at both ends
    pub fn go(&mut self, delta: isize) -> Option<RouteChangeEvent> {
        let event = self.history.go(delta)?;
        debug_log!("go({}) -> '{}'", delta, event.to);

        self.current.set(self.history.current().clone());
        Some(event)
    }

    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        self.go(1)
    }

    // ------------------------------------------------------------------------
    // Route entries
    // ------------------------------------------------------------------------

    /// Whether `route` is part of the current matched chain
    pub fn is_active(&self, route: &RouteDefinition) -> bool {
        self.current
            .with(|current| current.matched.iter().any(|m| std::ptr::eq(m.as_ref(), route)))
    }

    /// Top-level route at `index`
    pub fn route(&mut self, index: usize) -> Option<RouteEntry<'_>> {
        let route = Arc::clone(self.routes.get(index)?);
        let pattern = full_pattern(std::slice::from_ref(&route));
        Some(RouteEntry {
            router: self,
            route,
            pattern,
        })
    }

    /// Route with the given name anywhere in the tree
    pub fn route_named(&mut self, name: &str) -> Option<RouteEntry<'_>> {
        let chain = self.names.get(name)?;
        let pattern = full_pattern(chain);
        let route = Arc::clone(chain.last()?);
        Some(RouteEntry {
            router: self,
            route,
            pattern,
        })
    }
}

impl Default for MockRouter {
    /// A router with a single `/` route
    fn default() -> Self {
        Self::new("/", None, &RouterConfig::default())
    }
}

fn build_resolved(
    path: String,
    matched: Vec<RouteRef>,
    params: RouteParams,
    query: QueryParams,
    hash: String,
    name: Option<String>,
) -> ResolvedRoute {
    let leaf = matched.last();
    let name = name.or_else(|| leaf.and_then(|route| route.name.clone()));
    let meta = leaf.map(|route| route.meta.clone()).unwrap_or_default();
    let full_path = format_full_path(&path, &hash, &query);

    ResolvedRoute {
        path,
        matched,
        params,
        query,
        hash,
        full_path,
        name,
        meta,
    }
}

// ============================================================================
// RouteEntry
// ============================================================================

/// A route definition bound to its router
///
/// Returned by [`MockRouter::route`] and [`MockRouter::route_named`].
#[derive(Debug)]
pub struct RouteEntry<'r> {
    router: &'r mut MockRouter,
    route: RouteRef,
    pattern: String,
}

impl RouteEntry<'_> {
    /// The underlying definition
    pub fn definition(&self) -> &RouteRef {
        &self.route
    }

    /// Full path pattern, e.g. `/users/:userId`
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this route is in the current matched chain
    pub fn active(&self) -> bool {
        self.router.is_active(&self.route)
    }

    /// Push this route with the given params, query and hash
    pub fn activate(self, options: ActivateOptions) -> RouteChangeEvent {
        let location = options.into_location(self.pattern);
        self.router.push(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router(routes: impl IntoRoutes) -> MockRouter {
        MockRouter::new(routes, None, &RouterConfig::default())
    }

    #[test]
    fn test_default_router() {
        let router = MockRouter::default();
        assert_eq!(router.routes().len(), 1);
        assert_eq!(router.current_route().path, "/");
    }

    #[test]
    fn test_initial_route_is_first_route() {
        let router = router(vec!["/users/add", "/users/edit"]);
        assert_eq!(router.current_route().path, "/users/add");
    }

    #[test]
    fn test_empty_table_starts_at_root() {
        let router = router(Vec::<&str>::new());
        let current = router.current_route();
        assert_eq!(current.path, "/");
        assert!(current.matched.is_empty());
    }

    #[test]
    fn test_resolve_does_not_navigate() {
        let mut router = router(vec!["/", "/users"]);
        let resolved = router.resolve("/users");

        assert_eq!(resolved.path, "/users");
        assert_eq!(router.current_route().path, "/");
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_resolve_explicit_query_overrides_path_query() {
        let mut router = router("/users");
        let resolved = router.resolve(Location::path("/users?a=1&b=2").query("b", 3));

        assert_eq!(resolved.full_path, "/users?a=1&b=3");
    }

    #[test]
    fn test_bare_hash_is_no_hash() {
        let mut router = router("/users");
        let explicit = router.resolve(Location::path("/users").hash("#"));
        let inline = router.resolve("/users#");

        assert_eq!(explicit.hash, "");
        assert_eq!(explicit.full_path, "/users");
        assert_eq!(explicit.full_path, inline.full_path);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let mut router = MockRouter::default();
        let resolved = router.resolve(Location::named("user"));

        assert_eq!(resolved.path, "/user");
        assert_eq!(resolved.name.as_deref(), Some("user"));
        assert!(resolved.matched.is_empty());
    }

    #[test]
    fn test_params_bound_by_match_win() {
        let mut router = router("/users/:userId");
        let resolved = router.resolve(Location::path("/users/4").param("userId", "9"));

        assert_eq!(resolved.params.get("userId"), Some(&"4".to_string()));
    }

    #[test]
    fn test_meta_comes_from_leaf() {
        let mut router = router(
            RouteDefinition::new("/admin")
                .meta("title", "Admin")
                .child(RouteDefinition::new("users").meta("title", "Users")),
        );

        assert_eq!(router.resolve("/admin").meta.get("title").unwrap(), "Admin");
        assert_eq!(router.resolve("/admin/users").meta.get("title").unwrap(), "Users");
    }

    #[test]
    fn test_handle_tracks_navigation() {
        let mut router = router(vec!["/", "/users"]);
        let handle = router.current_handle();

        router.push("/users");
        assert_eq!(handle.path(), "/users");
        assert!(CurrentRoute::ptr_eq(&handle, &router.current_handle()));

        router.back();
        assert_eq!(handle.path(), "/");
    }

    #[test]
    fn test_go_without_movement_keeps_route() {
        let mut router = router(vec!["/", "/users"]);
        assert!(router.back().is_none());
        assert_eq!(router.current_route().path, "/");
    }

    #[test]
    fn test_route_named_entry() {
        let mut router = router(
            RouteDefinition::new("/user").child(RouteDefinition::new(":userId").name("child")),
        );

        let entry = router.route_named("child").unwrap();
        assert_eq!(entry.pattern(), "/user/:userId");
        assert!(!entry.active());

        entry.activate(ActivateOptions::new().param("userId", "4"));
        assert_eq!(router.current_route().path, "/user/4");
        assert!(router.route_named("child").unwrap().active());
        assert!(router.route_named("missing").is_none());
    }

    #[test]
    fn test_add_routes_registers_names() {
        let mut router = MockRouter::default();
        router.add_routes(RouteDefinition::new("/users/:id").name("user"));

        let params: RouteParams = [("id", "7")].into_iter().collect();
        assert_eq!(router.url_for("user", &params), Some("/users/7".to_string()));
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_cache_is_used_and_invalidated() {
        let mut router = router(vec!["/", "/users"]);
        router.resolve("/users");
        router.resolve("/users");
        assert!(router.cache_stats().hits >= 1);

        let invalidations = router.cache_stats().invalidations;
        router.add_routes("/posts");
        assert_eq!(router.cache_stats().invalidations, invalidations + 1);
        assert_eq!(router.resolve("/posts").matched.len(), 1);
    }
}
